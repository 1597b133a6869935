use serde::Deserialize;

/// What to do with target wavelengths outside a spectrum's own range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Extend the nearest boundary segment.
    #[default]
    Linear,
    /// Hold the boundary value.
    Clamp,
}

/// Piecewise-linear resampling of `(axis, values)` onto `target`.
///
/// `axis` must be strictly increasing with at least two points and the same
/// length as `values`. `target` may be in any order.
pub fn resample(axis: &[f64], values: &[f64], target: &[f64], extrapolation: Extrapolation) -> Vec<f64> {
    target
        .iter()
        .map(|&t| resample_one(t, axis, values, extrapolation))
        .collect()
}

/// Resample a single wavelength.
pub fn resample_one(t: f64, axis: &[f64], values: &[f64], extrapolation: Extrapolation) -> f64 {
    let n = axis.len();
    if extrapolation == Extrapolation::Clamp {
        if t <= axis[0] {
            return values[0];
        }
        if t >= axis[n - 1] {
            return values[n - 1];
        }
    }

    // Segment [lo, lo + 1]; the first and last segments also cover the outside.
    let lo = axis.partition_point(|&v| v <= t).clamp(1, n - 1) - 1;
    let frac = (t - axis[lo]) / (axis[lo + 1] - axis[lo]);
    // Weighted form keeps frac == 0 and frac == 1 exact at the sample points.
    (1.0 - frac) * values[lo] + frac * values[lo + 1]
}

use super::error::{MixError, Result};
use super::model::{CommonGrid, GridKind};

/// Build the wavelength grid both spectra are resampled onto.
///
/// Identical axes are passed through as-is. Otherwise the grid spans the
/// intersection of the two ranges with `grid_points` uniformly spaced values,
/// defaulting to the length of `axis_a`. A configured point count only applies
/// to the overlap grid.
///
/// Both axes must be sorted ascending with at least two points.
pub fn reconcile(axis_a: &[f64], axis_b: &[f64], grid_points: Option<usize>) -> Result<CommonGrid> {
    if axis_a == axis_b {
        return Ok(CommonGrid {
            wavelength: axis_a.to_vec(),
            kind: GridKind::Shared,
        });
    }

    let lo = axis_a[0].max(axis_b[0]);
    let hi = axis_a[axis_a.len() - 1].min(axis_b[axis_b.len() - 1]);
    if !(lo < hi) {
        return Err(MixError::NoOverlap { lo, hi });
    }

    let n = grid_points.unwrap_or(axis_a.len());
    if n < 2 {
        return Err(MixError::InvalidGridSize(n));
    }

    Ok(CommonGrid {
        wavelength: linspace(lo, hi, n),
        kind: GridKind::Overlap,
    })
}

/// `n` evenly spaced values from `lo` to `hi` inclusive; the last one is `hi` exactly.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| lo + i as f64 * step).collect();
            out[n - 1] = hi;
            out
        }
    }
}

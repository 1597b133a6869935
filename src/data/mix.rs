use super::error::{MixError, Result};

/// Elementwise `(1 - ratio) * a + ratio * b`.
///
/// Both inputs must be aligned on the same grid. Ratios outside `[0, 1]` are
/// computed as given and leave the convex hull of the inputs.
pub fn mix(resampled_a: &[f64], resampled_b: &[f64], ratio: f64) -> Result<Vec<f64>> {
    if resampled_a.len() != resampled_b.len() {
        return Err(MixError::ShapeMismatch {
            left: resampled_a.len(),
            right: resampled_b.len(),
        });
    }
    Ok(resampled_a
        .iter()
        .zip(resampled_b)
        .map(|(&a, &b)| (1.0 - ratio) * a + ratio * b)
        .collect())
}

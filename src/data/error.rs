/// Errors raised by the resampling-and-mixing kernel.
///
/// The loader, exporter and CLI wrap these in `anyhow` with context, so a
/// caller can still `downcast_ref::<MixError>()` to find out which invariant
/// failed.
#[derive(Debug, thiserror::Error)]
pub enum MixError {
    /// A spectrum is too short, ragged, or its columns could not be read.
    #[error("invalid spectrum '{source_name}': {reason}")]
    InputShape { source_name: String, reason: String },

    /// The two wavelength ranges do not intersect.
    #[error("wavelength ranges do not overlap (lower bound {lo} >= upper bound {hi})")]
    NoOverlap { lo: f64, hi: f64 },

    /// Grid-aligned sequences handed to the mixer have different lengths.
    #[error("resampled spectra differ in length ({left} vs {right})")]
    ShapeMismatch { left: usize, right: usize },

    /// A configured common grid cannot hold a line segment.
    #[error("grid point count must be at least 2, got {0}")]
    InvalidGridSize(usize),

    #[error("mixing ratio must be finite, got {0}")]
    InvalidRatio(f64),
}

impl MixError {
    pub fn input_shape(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        MixError::InputShape {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MixError>;

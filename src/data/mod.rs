/// Data layer: endmember loading, the resampling-and-mixing kernel, export.
///
/// Architecture:
/// ```text
///  .txt / .csv / .json / .parquet   (A and B)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, scale wavelengths → Spectrum
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   grid    │  equal axes → shared, else overlap → CommonGrid
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resample  │  piecewise-linear onto the grid (skipped when shared)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   mix     │  (1 - r)·A + r·B per ratio → MixedSpectrum
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  two-column text file
///   └──────────┘
/// ```
/// `pipeline` sequences grid → resample → mix.

pub mod error;
pub mod export;
pub mod grid;
pub mod loader;
pub mod mix;
pub mod model;
pub mod pipeline;
pub mod resample;

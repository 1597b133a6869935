use std::fmt;

use super::error::{MixError, Result};

// ---------------------------------------------------------------------------
// Spectrum – one endmember as read from disk
// ---------------------------------------------------------------------------

/// A single reflectance spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Where the spectrum came from (file name or label), used in errors.
    pub name: String,
    /// Wavelength axis (x), already scaled to the working unit.
    pub wavelength: Vec<f64>,
    /// Reflectance (y) – same length as `wavelength`.
    pub reflectance: Vec<f64>,
}

impl Spectrum {
    /// Build a spectrum, checking the column lengths and the two-point minimum.
    ///
    /// Ordering of the wavelength axis is not checked here; see
    /// [`Spectrum::check_increasing`].
    pub fn new(name: impl Into<String>, wavelength: Vec<f64>, reflectance: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if wavelength.len() != reflectance.len() {
            return Err(MixError::input_shape(
                name,
                format!(
                    "{} wavelengths but {} reflectance values",
                    wavelength.len(),
                    reflectance.len()
                ),
            ));
        }
        if wavelength.len() < 2 {
            return Err(MixError::input_shape(
                name,
                format!("need at least 2 points, got {}", wavelength.len()),
            ));
        }
        Ok(Spectrum {
            name,
            wavelength,
            reflectance,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Fail unless the wavelength axis is strictly increasing.
    pub fn check_increasing(&self) -> Result<()> {
        match self.wavelength.windows(2).position(|w| !(w[0] < w[1])) {
            None => Ok(()),
            Some(i) => Err(MixError::input_shape(
                self.name.clone(),
                format!(
                    "wavelengths must be strictly increasing, but index {} is {} and index {} is {}",
                    i,
                    self.wavelength[i],
                    i + 1,
                    self.wavelength[i + 1]
                ),
            )),
        }
    }

    /// First and last wavelength.
    pub fn range(&self) -> (f64, f64) {
        (self.wavelength[0], self.wavelength[self.len() - 1])
    }

    /// `[x, y]` pairs for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.wavelength
            .iter()
            .zip(&self.reflectance)
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// CommonGrid – the shared wavelength axis
// ---------------------------------------------------------------------------

/// How the common grid was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridKind {
    /// Both axes were element-wise equal; the grid is spectrum A's axis.
    Shared,
    /// Uniform grid over the intersection of both ranges.
    Overlap,
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridKind::Shared => write!(f, "shared axis"),
            GridKind::Overlap => write!(f, "overlap grid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommonGrid {
    pub wavelength: Vec<f64>,
    pub kind: GridKind,
}

impl CommonGrid {
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }
}

// ---------------------------------------------------------------------------
// MixedSpectrum – pipeline output
// ---------------------------------------------------------------------------

/// Weighted combination of two endmembers on a common grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedSpectrum {
    /// Weight given to spectrum B.
    pub ratio: f64,
    pub wavelength: Vec<f64>,
    pub reflectance: Vec<f64>,
}

impl MixedSpectrum {
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// `[x, y]` pairs for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.wavelength
            .iter()
            .zip(&self.reflectance)
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}

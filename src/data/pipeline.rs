use super::error::{MixError, Result};
use super::grid::reconcile;
use super::mix::mix;
use super::model::{CommonGrid, GridKind, MixedSpectrum, Spectrum};
use super::resample::{Extrapolation, resample};

/// Kernel settings shared by every ratio of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct MixSettings {
    /// Weights given to spectrum B; one mixed spectrum per entry.
    pub ratios: Vec<f64>,
    /// Overlap grid resolution; `None` uses spectrum A's point count.
    pub grid_points: Option<usize>,
    pub extrapolation: Extrapolation,
}

impl Default for MixSettings {
    fn default() -> Self {
        Self {
            ratios: vec![0.5],
            grid_points: None,
            extrapolation: Extrapolation::Linear,
        }
    }
}

/// Everything the exporter and viewer need from one run.
#[derive(Debug, Clone)]
pub struct MixOutcome {
    pub grid: CommonGrid,
    pub resampled_a: Vec<f64>,
    pub resampled_b: Vec<f64>,
    pub mixes: Vec<MixedSpectrum>,
}

/// Reconcile, resample and mix two endmembers for every configured ratio.
///
/// Nothing is returned unless every ratio succeeded.
pub fn mix_spectra(a: &Spectrum, b: &Spectrum, settings: &MixSettings) -> Result<MixOutcome> {
    a.check_increasing()?;
    b.check_increasing()?;
    if let Some(&bad) = settings.ratios.iter().find(|r| !r.is_finite()) {
        return Err(MixError::InvalidRatio(bad));
    }

    let grid = reconcile(&a.wavelength, &b.wavelength, settings.grid_points)?;
    log::info!(
        "Common grid: {} points over [{}, {}] ({})",
        grid.len(),
        grid.wavelength[0],
        grid.wavelength[grid.len() - 1],
        grid.kind
    );

    let (resampled_a, resampled_b) = match grid.kind {
        GridKind::Shared => (a.reflectance.clone(), b.reflectance.clone()),
        GridKind::Overlap => (
            resample(&a.wavelength, &a.reflectance, &grid.wavelength, settings.extrapolation),
            resample(&b.wavelength, &b.reflectance, &grid.wavelength, settings.extrapolation),
        ),
    };

    let mut mixes = Vec::with_capacity(settings.ratios.len());
    for &ratio in &settings.ratios {
        if !(0.0..=1.0).contains(&ratio) {
            log::warn!("Mixing ratio {ratio} is outside [0, 1]; result leaves the endmember hull");
        }
        let reflectance = mix(&resampled_a, &resampled_b, ratio)?;
        mixes.push(MixedSpectrum {
            ratio,
            wavelength: grid.wavelength.clone(),
            reflectance,
        });
    }

    Ok(MixOutcome {
        grid,
        resampled_a,
        resampled_b,
        mixes,
    })
}

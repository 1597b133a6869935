//! TOML configuration file and command-line overrides.
//!
//! Every setting can live in a config file; flags given on the command line
//! win over the file:
//!
//! ```toml
//! # mix.toml
//! [endmember_a]
//! path = "Land_Shields2013.txt"
//! label = "land"
//!
//! [endmember_b]
//! path = "BVdry_calibrated.txt"
//! label = "biota"
//! wavelength_scale = 0.001   # nanometres → microns
//!
//! [mix]
//! ratios = [0.25, 0.5, 0.75]
//! grid_points = 500
//! extrapolation = "linear"   # or "clamp"
//!
//! [output]
//! path = "test_mix_land.txt"
//! plot = true
//!
//! [plot]
//! title = "Snowball Earth"
//! x_bounds = [0.0, 2.5]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::data::export::sweep_output_path;
use crate::data::loader::LoaderConfig;
use crate::data::pipeline::MixSettings;
use crate::data::resample::Extrapolation;
use crate::ui::style::PlotStyle;

/// Output file used when neither the config nor the command line names one.
pub const DEFAULT_OUTPUT: &str = "mixed_spectrum.txt";

const MAX_RATIO_DECIMALS: usize = 17;

// ---------------------------------------------------------------------------
// File layout
// ---------------------------------------------------------------------------

/// Root configuration structure for mix config files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endmember_a: EndmemberConfig,
    #[serde(default)]
    pub endmember_b: EndmemberConfig,
    #[serde(default)]
    pub mix: MixConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub plot: PlotStyle,
}

/// One input spectrum.
#[derive(Debug, Default, Deserialize)]
pub struct EndmemberConfig {
    pub path: Option<PathBuf>,
    /// Name used in the legend and in sweep file names (defaults to the file stem).
    pub label: Option<String>,
    /// Multiplies raw wavelengths, e.g. 0.001 for nanometres → microns.
    pub wavelength_scale: Option<f64>,
    /// Spectrum index inside JSON / Parquet datasets.
    pub row: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MixConfig {
    /// Weights of endmember B.
    pub ratios: Option<Vec<f64>>,
    /// Overlap grid resolution (defaults to endmember A's point count).
    pub grid_points: Option<usize>,
    pub extrapolation: Option<Extrapolation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    /// Open the interactive plot after writing.
    pub plot: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

// ---------------------------------------------------------------------------
// Command-line overrides
// ---------------------------------------------------------------------------

/// Values taken from the command line; `None` / empty means "not given".
#[derive(Debug, Default)]
pub struct Overrides {
    pub spectrum_a: Option<PathBuf>,
    pub spectrum_b: Option<PathBuf>,
    pub label_a: Option<String>,
    pub label_b: Option<String>,
    pub scale_a: Option<f64>,
    pub scale_b: Option<f64>,
    pub ratios: Vec<f64>,
    pub grid_points: Option<usize>,
    pub clamp: bool,
    pub output: Option<PathBuf>,
    pub no_plot: bool,
    pub show_endmembers: bool,
}

// ---------------------------------------------------------------------------
// Resolved settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Endmember {
    pub path: PathBuf,
    pub label: String,
    pub loader: LoaderConfig,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub a: Endmember,
    pub b: Endmember,
    pub mix: MixSettings,
    pub output: PathBuf,
    pub show_plot: bool,
    pub style: PlotStyle,
}

impl RunSettings {
    /// Merge the config file with command-line overrides.
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Self> {
        let a = resolve_endmember(
            "A",
            config.endmember_a,
            overrides.spectrum_a,
            overrides.label_a,
            overrides.scale_a,
        )?;
        let b = resolve_endmember(
            "B",
            config.endmember_b,
            overrides.spectrum_b,
            overrides.label_b,
            overrides.scale_b,
        )?;

        let ratios = if overrides.ratios.is_empty() {
            config.mix.ratios.unwrap_or_else(|| vec![0.5])
        } else {
            overrides.ratios
        };
        if ratios.is_empty() {
            bail!("at least one mixing ratio is required");
        }
        for (i, r) in ratios.iter().enumerate() {
            if ratios[..i].contains(r) {
                bail!("mixing ratio {r} is listed more than once");
            }
        }

        let extrapolation = if overrides.clamp {
            Extrapolation::Clamp
        } else {
            config.mix.extrapolation.unwrap_or_default()
        };

        let mut style = config.plot;
        style.show_endmembers |= overrides.show_endmembers;

        let settings = RunSettings {
            a,
            b,
            mix: MixSettings {
                ratios,
                grid_points: overrides.grid_points.or(config.mix.grid_points),
                extrapolation,
            },
            output: overrides
                .output
                .or(config.output.path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            show_plot: !overrides.no_plot && config.output.plot.unwrap_or(true),
            style,
        };
        settings.output_paths()?;
        Ok(settings)
    }

    /// Whether more than one ratio is mixed in this run.
    pub fn is_sweep(&self) -> bool {
        self.mix.ratios.len() > 1
    }

    /// Output file for each ratio, in ratio order.
    ///
    /// Sweep file names start with two decimals per ratio and grow until every
    /// ratio gets its own file.
    pub fn output_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.is_sweep() {
            return Ok(vec![self.output.clone()]);
        }
        for decimals in 2..=MAX_RATIO_DECIMALS {
            let paths: Vec<PathBuf> = self
                .mix
                .ratios
                .iter()
                .map(|&r| sweep_output_path(&self.output, &self.a.label, &self.b.label, r, decimals))
                .collect();
            let unique: HashSet<&PathBuf> = paths.iter().collect();
            if unique.len() == paths.len() {
                return Ok(paths);
            }
        }
        bail!(
            "mixing ratios {:?} are too close to give each its own output file",
            self.mix.ratios
        )
    }
}

fn resolve_endmember(
    which: &str,
    file: EndmemberConfig,
    path: Option<PathBuf>,
    label: Option<String>,
    scale: Option<f64>,
) -> Result<Endmember> {
    let Some(path) = path.or(file.path) else {
        bail!("no path given for endmember {which} (pass it on the command line or set [endmember_{}].path)", which.to_ascii_lowercase());
    };
    let label = label.or(file.label).unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| which.to_string())
    });
    if label.is_empty() || label == "." || label == ".." || label.contains(['/', '\\']) {
        bail!("label for endmember {which} must be a plain file-name part, got '{label}'");
    }

    let defaults = LoaderConfig::default();
    let wavelength_scale = scale.or(file.wavelength_scale).unwrap_or(defaults.wavelength_scale);
    if !wavelength_scale.is_finite() || wavelength_scale <= 0.0 {
        bail!("wavelength scale for endmember {which} must be positive, got {wavelength_scale}");
    }

    Ok(Endmember {
        path,
        label,
        loader: LoaderConfig {
            wavelength_scale,
            row: file.row.unwrap_or(defaults.row),
        },
    })
}

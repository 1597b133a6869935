//! # spectra-mix
//!
//! Resamples two reflectance spectra onto a common wavelength grid, mixes
//! them linearly, writes the result and shows it in an interactive plot.
//!
//! ```bash
//! # 50/50 mix of a land and a biota spectrum (biota wavelengths in nm)
//! spectra-mix Land_Shields2013.txt BVdry_calibrated.txt --scale-b 0.001 -o test_mix_land.txt
//!
//! # Ratio sweep from a config file, no window
//! spectra-mix --config mix.toml -r 0.25 -r 0.5 -r 0.75 --no-plot
//! ```

mod app;
mod color;
mod config;
mod data;
mod session;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;

use app::MixViewerApp;
use config::{Config, Overrides, RunSettings};
use state::ViewerState;

/// Linear mixing of two reflectance spectra
#[derive(Parser)]
#[command(name = "spectra-mix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Endmember A spectrum file
    #[arg(value_name = "SPECTRUM_A")]
    spectrum_a: Option<PathBuf>,

    /// Endmember B spectrum file
    #[arg(value_name = "SPECTRUM_B")]
    spectrum_b: Option<PathBuf>,

    /// TOML config file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Weight of endmember B (repeat or comma-separate for a sweep)
    #[arg(short = 'r', long = "ratio", value_delimiter = ',', allow_negative_numbers = true)]
    ratios: Vec<f64>,

    /// Wavelength scale factor for A
    #[arg(long)]
    scale_a: Option<f64>,

    /// Wavelength scale factor for B (0.001 for nm → microns)
    #[arg(long)]
    scale_b: Option<f64>,

    /// Legend / file-name label for A
    #[arg(long)]
    label_a: Option<String>,

    /// Legend / file-name label for B
    #[arg(long)]
    label_b: Option<String>,

    /// Points on the overlap grid (default: as many as A)
    #[arg(short = 'n', long)]
    grid_points: Option<usize>,

    /// Hold boundary values instead of extrapolating linearly
    #[arg(long)]
    clamp: bool,

    /// Output file (sweeps derive one name per ratio from it)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not open the plot window
    #[arg(long)]
    no_plot: bool,

    /// Overlay both endmembers in the plot
    #[arg(long)]
    show_endmembers: bool,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(self) -> Overrides {
        Overrides {
            spectrum_a: self.spectrum_a,
            spectrum_b: self.spectrum_b,
            label_a: self.label_a,
            label_b: self.label_b,
            scale_a: self.scale_a,
            scale_b: self.scale_b,
            ratios: self.ratios,
            grid_points: self.grid_points,
            clamp: self.clamp,
            output: self.output,
            no_plot: self.no_plot,
            show_endmembers: self.show_endmembers,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let settings = RunSettings::resolve(config, cli.overrides())?;

    let session = match session::run(&settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e:#}");
            return Err(e);
        }
    };
    for path in &session.written {
        println!("{}", path.display());
    }

    if !settings.show_plot {
        return Ok(());
    }

    let state = ViewerState::new(session, settings.style);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "spectra-mix – Mixed Spectrum",
        options,
        Box::new(|cc| Ok(Box::new(MixViewerApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_ratio_list() {
        let cli = Cli::parse_from(["spectra-mix", "a.txt", "b.txt", "-r", "0.25,0.5", "--ratio", "-0.1", "--no-plot"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.ratios, vec![0.25, 0.5, -0.1]);
        assert!(overrides.no_plot);
        assert_eq!(overrides.spectrum_b, Some(PathBuf::from("b.txt")));
    }
}

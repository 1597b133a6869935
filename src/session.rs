use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::RunSettings;
use crate::data::export::write_spectra;
use crate::data::loader::load_file;
use crate::data::model::{MixedSpectrum, Spectrum};
use crate::data::pipeline::{MixOutcome, mix_spectra};

// ---------------------------------------------------------------------------
// One complete run: load → mix → export
// ---------------------------------------------------------------------------

/// Results of a finished run, handed to the viewer.
#[derive(Debug, Clone)]
pub struct Session {
    pub a: Spectrum,
    pub b: Spectrum,
    pub label_a: String,
    pub label_b: String,
    pub outcome: MixOutcome,
    /// Files written, one per mixed spectrum.
    pub written: Vec<PathBuf>,
}

/// Run the whole pipeline and write every output file.
///
/// Files are only written once all ratios have been mixed, and either every
/// output file is replaced or none is.
pub fn run(settings: &RunSettings) -> Result<Session> {
    let a = load_file(&settings.a.path, &settings.a.loader)
        .with_context(|| format!("loading endmember A ({})", settings.a.label))?;
    let b = load_file(&settings.b.path, &settings.b.loader)
        .with_context(|| format!("loading endmember B ({})", settings.b.label))?;
    log::info!(
        "Endmember A '{}': {} points over {:?}; endmember B '{}': {} points over {:?}",
        settings.a.label,
        a.len(),
        a.range(),
        settings.b.label,
        b.len(),
        b.range()
    );

    let outcome = mix_spectra(&a, &b, &settings.mix).context("mixing spectra")?;

    let paths = settings.output_paths()?;
    let outputs: Vec<(&Path, &MixedSpectrum)> = paths
        .iter()
        .map(PathBuf::as_path)
        .zip(&outcome.mixes)
        .collect();
    write_spectra(&outputs)?;

    Ok(Session {
        a,
        b,
        label_a: settings.a.label.clone(),
        label_b: settings.b.label.clone(),
        outcome,
        written: paths,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Overrides};
    use crate::data::error::MixError;
    use crate::data::loader::{LoaderConfig, NANOMETERS_TO_MICRONS};

    fn settings(dir: &std::path::Path, a: &str, b: &str, ratios: Vec<f64>) -> RunSettings {
        let pa = dir.join("land.txt");
        let pb = dir.join("biota.txt");
        std::fs::write(&pa, a).unwrap();
        std::fs::write(&pb, b).unwrap();
        let overrides = Overrides {
            spectrum_a: Some(pa),
            spectrum_b: Some(pb),
            scale_b: Some(NANOMETERS_TO_MICRONS),
            ratios,
            output: Some(dir.join("mix.txt")),
            no_plot: true,
            ..Default::default()
        };
        RunSettings::resolve(Config::default(), overrides).unwrap()
    }

    #[test]
    fn test_run_writes_mixed_file() {
        let dir = tempfile::tempdir().unwrap();
        let s = settings(
            dir.path(),
            "0.5 0.2 0.01\n1.0 0.4 0.01\n1.5 0.6 0.01\n2.0 0.8 0.01\n",
            "750 0.5 0.1\n1750 0.5 0.1\n",
            vec![0.5],
        );
        let session = run(&s).unwrap();
        assert_eq!(session.written, vec![dir.path().join("mix.txt")]);
        assert_eq!(session.outcome.grid.len(), 4);

        let back = load_file(&session.written[0], &LoaderConfig::default()).unwrap();
        let mixed = &session.outcome.mixes[0];
        assert_eq!(back.len(), mixed.len());
        for (x, y) in back.reflectance.iter().zip(&mixed.reflectance) {
            assert!((x - y).abs() < 1e-12);
        }
        assert!((back.wavelength[0] - 0.75).abs() < 1e-12);
        assert!((back.wavelength[3] - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_writes_one_file_per_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let s = settings(
            dir.path(),
            "0.5 0.2\n2.0 0.8\n",
            "500 0.5\n2000 0.5\n",
            vec![0.0, 1.0],
        );
        let session = run(&s).unwrap();
        assert_eq!(session.written.len(), 2);
        assert!(dir.path().join("mix_land1.00_biota0.00.txt").exists());
        assert!(dir.path().join("mix_land0.00_biota1.00.txt").exists());
    }

    #[test]
    fn test_close_ratios_write_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let s = settings(
            dir.path(),
            "0.5 0.0\n2.0 0.0\n",
            "500 1.0\n2000 1.0\n",
            vec![0.251, 0.254],
        );
        let session = run(&s).unwrap();
        assert_ne!(session.written[0], session.written[1]);
        for (path, mixed) in session.written.iter().zip(&session.outcome.mixes) {
            let back = load_file(path, &LoaderConfig::default()).unwrap();
            assert!(back.reflectance.iter().all(|&r| (r - mixed.ratio).abs() < 1e-12));
        }
        assert!(dir.path().join("mix_land0.749_biota0.251.txt").exists());
        assert!(dir.path().join("mix_land0.746_biota0.254.txt").exists());
    }

    #[test]
    fn test_no_overlap_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let s = settings(dir.path(), "0.1 0.2\n0.2 0.8\n", "500 0.5\n2000 0.5\n", vec![0.5]);
        let err = run(&s).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MixError>(),
            Some(MixError::NoOverlap { .. })
        ));
        assert!(!dir.path().join("mix.txt").exists());
    }
}

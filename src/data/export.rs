use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use super::model::MixedSpectrum;

/// Write `wavelength reflectance` lines in grid order.
///
/// Values use 18 fractional digits in scientific notation, enough for the
/// text loader to read back the exact `f64`.
pub fn write_spectrum(path: &Path, spectrum: &MixedSpectrum) -> Result<()> {
    write_spectra(&[(path, spectrum)])
}

/// Write several spectra, staging every file before any destination is touched.
///
/// Each spectrum is first written to a temporary file in its destination
/// directory; the temporaries are renamed into place only once all of them
/// are complete. A failed write leaves no output files behind.
pub fn write_spectra(outputs: &[(&Path, &MixedSpectrum)]) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for &(path, spectrum) in outputs {
        staged.push(stage(path, spectrum)?);
    }

    for (tmp, &(path, spectrum)) in staged.into_iter().zip(outputs) {
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("moving output into place at {}", path.display()))?;
        log::info!(
            "Wrote {} points (ratio {}) to {}",
            spectrum.len(),
            spectrum.ratio,
            path.display()
        );
    }
    Ok(())
}

fn stage(path: &Path, spectrum: &MixedSpectrum) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating output file {}", path.display()))?;
    let mut out = BufWriter::new(tmp);
    write_columns(&mut out, spectrum)
        .with_context(|| format!("writing {}", path.display()))?;
    out.into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("flushing {}", path.display()))
}

pub fn write_columns<W: Write>(out: &mut W, spectrum: &MixedSpectrum) -> std::io::Result<()> {
    for (w, r) in spectrum.wavelength.iter().zip(&spectrum.reflectance) {
        writeln!(out, "{w:.18e} {r:.18e}")?;
    }
    Ok(())
}

/// Output file for one ratio of a sweep:
/// `<stem>_<label_a><1-r>_<label_b><r>.<ext>` next to `base`, ratios printed
/// with `decimals` fractional digits.
pub fn sweep_output_path(
    base: &Path,
    label_a: &str,
    label_b: &str,
    ratio: f64,
    decimals: usize,
) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mix".to_string());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "txt".to_string());
    base.with_file_name(format!(
        "{stem}_{label_a}{:.decimals$}_{label_b}{:.decimals$}.{ext}",
        1.0 - ratio,
        ratio
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{LoaderConfig, load_file};

    #[test]
    fn test_write_columns_format() {
        let sp = MixedSpectrum {
            ratio: 0.5,
            wavelength: vec![0.5, 1.25],
            reflectance: vec![0.1, 0.75],
        };
        let mut buf = Vec::new();
        write_columns(&mut buf, &sp).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split_whitespace().count(), 2);
        assert!(lines[1].starts_with("1.25"));
    }

    #[test]
    fn test_round_trip_through_loader() {
        let sp = MixedSpectrum {
            ratio: 0.3,
            wavelength: vec![0.35, 0.4123456789012345, 1.0 / 3.0, 2.5],
            reflectance: vec![0.1, 2.0 / 7.0, 0.333333333, 1e-9],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.txt");
        write_spectrum(&path, &sp).unwrap();

        let back = load_file(&path, &LoaderConfig::default()).unwrap();
        assert_eq!(back.wavelength.len(), sp.wavelength.len());
        for (a, b) in back.wavelength.iter().zip(&sp.wavelength) {
            approx::assert_relative_eq!(*a, *b, max_relative = 1e-15);
        }
        for (a, b) in back.reflectance.iter().zip(&sp.reflectance) {
            approx::assert_relative_eq!(*a, *b, max_relative = 1e-15);
        }
    }

    #[test]
    fn test_sweep_output_path() {
        let p = sweep_output_path(Path::new("out/Mix.txt"), "land", "biota", 0.25, 2);
        assert_eq!(p, PathBuf::from("out/Mix_land0.75_biota0.25.txt"));

        let p = sweep_output_path(Path::new("mixed"), "a", "b", 1.0, 2);
        assert_eq!(p, PathBuf::from("mixed_a0.00_b1.00.txt"));

        let p = sweep_output_path(Path::new("mix.dat"), "a", "b", 0.251, 3);
        assert_eq!(p, PathBuf::from("mix_a0.749_b0.251.dat"));
    }

    #[test]
    fn test_failed_write_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let sp = MixedSpectrum {
            ratio: 0.5,
            wavelength: vec![0.5, 1.0],
            reflectance: vec![0.2, 0.4],
        };
        let good = dir.path().join("first.txt");
        let bad = dir.path().join("missing").join("second.txt");

        assert!(write_spectra(&[(good.as_path(), &sp), (bad.as_path(), &sp)]).is_err());
        assert!(!good.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_spectra_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.txt");
        std::fs::write(&path, "stale\n").unwrap();
        let sp = MixedSpectrum {
            ratio: 0.5,
            wavelength: vec![0.5, 1.0],
            reflectance: vec![0.2, 0.4],
        };
        write_spectrum(&path, &sp).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("stale"));
    }
}

use std::fmt::Write as _;

use anyhow::{Context, Result};

/// Gaussian absorption band depth at `x`.
fn band(x: f64, center: f64, sigma: f64, depth: f64) -> f64 {
    depth * (-(x - center).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Continuum minus absorption bands, plus noise, kept inside [0, 1].
fn reflectance(
    wavelengths_um: &[f64],
    continuum: impl Fn(f64) -> f64,
    bands: &[(f64, f64, f64)],
    noise_level: f64,
    noise: &mut Noise,
) -> Vec<f64> {
    wavelengths_um
        .iter()
        .map(|&w| {
            let absorbed: f64 = bands
                .iter()
                .map(|&(center, sigma, depth)| band(w, center, sigma, depth))
                .sum();
            (continuum(w) - absorbed + noise.jitter(noise_level)).clamp(0.0, 1.0)
        })
        .collect()
}

/// Seeded splitmix64 sequence.
struct Noise(u64);

impl Noise {
    /// Uniform in [0, 1).
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Roughly normal, zero mean, standard deviation `sigma` (Irwin–Hall, 12 terms).
    fn jitter(&mut self, sigma: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.uniform()).sum();
        (sum - 6.0) * sigma
    }
}

/// Three columns: wavelength, reflectance, error.
fn to_text(wavelengths: &[f64], values: &[f64], error: f64) -> String {
    let mut out = String::new();
    for (w, r) in wavelengths.iter().zip(values) {
        let _ = writeln!(out, "{w:.6} {r:.6} {error:.4}");
    }
    out
}

fn main() -> Result<()> {
    let mut noise = Noise(42);

    // Land: microns, 0.30 → 2.60, step 0.01
    let land_um: Vec<f64> = (0..=230).map(|i| 0.30 + i as f64 * 0.01).collect();
    let land = reflectance(
        &land_um,
        |w| 0.15 + 0.25 * (w - 0.3) / 2.3,
        &[(1.4, 0.05, 0.05), (1.9, 0.06, 0.08), (2.3, 0.04, 0.04)],
        0.004,
        &mut noise,
    );

    // Biota: nanometres, 400 → 2400, step 5 (narrower than land)
    let biota_nm: Vec<f64> = (0..=400).map(|i| 400.0 + i as f64 * 5.0).collect();
    let biota_um: Vec<f64> = biota_nm.iter().map(|nm| nm * 1e-3).collect();
    let biota = reflectance(
        &biota_um,
        // red edge near 0.7 microns
        |w| 0.05 + 0.45 / (1.0 + (-(w - 0.72) / 0.02).exp()),
        &[(0.67, 0.03, 0.03), (1.45, 0.07, 0.2), (1.94, 0.08, 0.25)],
        0.006,
        &mut noise,
    );

    let land_path = "sample_land.txt";
    let biota_path = "sample_biota.txt";
    std::fs::write(land_path, to_text(&land_um, &land, 0.01))
        .with_context(|| format!("writing {land_path}"))?;
    std::fs::write(biota_path, to_text(&biota_nm, &biota, 0.02))
        .with_context(|| format!("writing {biota_path}"))?;

    println!(
        "Wrote {} land points (microns) to {land_path} and {} biota points (nm) to {biota_path}",
        land.len(),
        biota.len()
    );
    println!("Try: spectra-mix {land_path} {biota_path} --scale-b 0.001 --show-endmembers");
    Ok(())
}

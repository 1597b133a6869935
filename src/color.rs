use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// Muted colours for the two endmember overlays (A, B).
pub const ENDMEMBER_COLORS: [Color32; 2] = [
    Color32::from_rgb(120, 120, 120),
    Color32::from_rgb(110, 160, 110),
];

/// `n` visually distinct colours for mixed spectra.
///
/// Hues are spread over the warm-to-blue part of the wheel so a sweep reads
/// as a progression from endmember A to endmember B.
pub fn mix_palette(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![hsl_to_color32(210.0, 0.8, 0.5)],
        _ => (0..n)
            .map(|i| {
                let hue = 20.0 + (i as f32 / (n - 1) as f32) * 220.0;
                hsl_to_color32(hue, 0.75, 0.5)
            })
            .collect(),
    }
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_sizes() {
        assert!(mix_palette(0).is_empty());
        assert_eq!(mix_palette(1).len(), 1);
        assert_eq!(mix_palette(5).len(), 5);
    }

    #[test]
    fn test_palette_colors_distinct() {
        let colors = mix_palette(4);
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
    }
}

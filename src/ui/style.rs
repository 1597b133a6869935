use eframe::egui::{self, FontFamily, TextStyle};
use egui_plot::Corner;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// PlotStyle – everything the presenter needs to know about looks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendCorner {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

impl From<LegendCorner> for Corner {
    fn from(c: LegendCorner) -> Self {
        match c {
            LegendCorner::LeftTop => Corner::LeftTop,
            LegendCorner::RightTop => Corner::RightTop,
            LegendCorner::LeftBottom => Corner::LeftBottom,
            LegendCorner::RightBottom => Corner::RightBottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    Proportional,
    Monospace,
}

impl From<FontChoice> for FontFamily {
    fn from(f: FontChoice) -> Self {
        match f {
            FontChoice::Proportional => FontFamily::Proportional,
            FontChoice::Monospace => FontFamily::Monospace,
        }
    }
}

/// Plot appearance, read from the `[plot]` config section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    /// Initial x range (wavelength).
    pub x_bounds: [f64; 2],
    /// Initial y range (reflectance).
    pub y_bounds: [f64; 2],
    /// Legend entry of the mixed spectrum; sweeps append the ratio.
    pub legend_label: String,
    pub legend_corner: LegendCorner,
    /// Draw mixed spectra dashed.
    pub dashed: bool,
    pub show_grid: bool,
    /// Overlay both endmembers on their native grids.
    pub show_endmembers: bool,
    pub line_width: f32,
    pub font_size: f32,
    pub font_family: FontChoice,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            title: None,
            x_label: "Wavelength (microns)".to_string(),
            y_label: "Reflectance".to_string(),
            x_bounds: [0.0, 2.5],
            y_bounds: [0.0, 1.0],
            legend_label: "Mixed spectrum".to_string(),
            legend_corner: LegendCorner::RightTop,
            dashed: true,
            show_grid: true,
            show_endmembers: false,
            line_width: 1.5,
            font_size: 14.0,
            font_family: FontChoice::Proportional,
        }
    }
}

impl PlotStyle {
    /// Install the font settings on an egui context.
    pub fn apply_fonts(&self, ctx: &egui::Context) {
        let family: FontFamily = self.font_family.into();
        let size = self.font_size;
        ctx.style_mut(|style| {
            for (text_style, font) in style.text_styles.iter_mut() {
                font.size = match text_style {
                    TextStyle::Heading => size * 1.4,
                    TextStyle::Small => size * 0.75,
                    _ => size,
                };
                if *text_style != TextStyle::Monospace {
                    font.family = family.clone();
                }
            }
        });
    }

    /// Legend entry for one mixed spectrum.
    pub fn mix_label(&self, ratio: f64, sweep: bool) -> String {
        if sweep {
            format!("{} (r = {ratio:.2})", self.legend_label)
        } else {
            self.legend_label.clone()
        }
    }
}

use std::path::Path;

use anyhow::Result;
use eframe::egui::Color32;

use crate::color::{ENDMEMBER_COLORS, mix_palette};
use crate::data::export::write_spectrum;
use crate::data::model::{GridKind, MixedSpectrum, Spectrum};
use crate::session::Session;
use crate::ui::style::PlotStyle;

// ---------------------------------------------------------------------------
// Plot series
// ---------------------------------------------------------------------------

/// One line of the plot, ready to draw.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<[f64; 2]>,
    pub color: Color32,
    pub dashed: bool,
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct ViewerState {
    pub style: PlotStyle,

    /// Endmembers on their native (scaled) grids.
    pub endmembers: [Spectrum; 2],
    pub endmember_labels: [String; 2],

    /// Mixed spectra in ratio order.
    pub mixes: Vec<MixedSpectrum>,

    /// Which mixes are drawn.
    pub visible: Vec<bool>,

    /// Mix written by File → Export….
    pub selected: usize,

    pub colors: Vec<Color32>,

    pub grid_kind: GridKind,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(session: Session, style: PlotStyle) -> Self {
        let n = session.outcome.mixes.len();
        Self {
            style,
            endmembers: [session.a, session.b],
            endmember_labels: [session.label_a, session.label_b],
            visible: vec![true; n],
            selected: 0,
            colors: mix_palette(n),
            grid_kind: session.outcome.grid.kind,
            mixes: session.outcome.mixes,
            status_message: None,
        }
    }

    pub fn is_sweep(&self) -> bool {
        self.mixes.len() > 1
    }

    pub fn grid_len(&self) -> usize {
        self.mixes.first().map_or(0, |m| m.len())
    }

    /// Legend label of mix `i`.
    pub fn mix_label(&self, i: usize) -> String {
        self.style.mix_label(self.mixes[i].ratio, self.is_sweep())
    }

    pub fn toggle_visible(&mut self, i: usize) {
        if let Some(v) = self.visible.get_mut(i) {
            *v = !*v;
        }
    }

    pub fn select(&mut self, i: usize) {
        if i < self.mixes.len() {
            self.selected = i;
        }
    }

    /// Lines to draw, endmembers first so mixes sit on top.
    pub fn series(&self) -> Vec<PlotSeries> {
        let mut out = Vec::new();
        if self.style.show_endmembers {
            for ((sp, label), color) in self
                .endmembers
                .iter()
                .zip(&self.endmember_labels)
                .zip(ENDMEMBER_COLORS)
            {
                out.push(PlotSeries {
                    label: label.clone(),
                    points: sp.points(),
                    color,
                    dashed: false,
                });
            }
        }
        for (i, mixed) in self.mixes.iter().enumerate() {
            if !self.visible[i] {
                continue;
            }
            out.push(PlotSeries {
                label: self.mix_label(i),
                points: mixed.points(),
                color: self.colors[i],
                dashed: self.style.dashed,
            });
        }
        out
    }

    /// Write the selected mix to `path` and report the outcome in the status line.
    pub fn export_selected(&mut self, path: &Path) -> Result<()> {
        let result = write_spectrum(path, &self.mixes[self.selected]);
        self.status_message = Some(match &result {
            Ok(()) => format!("Exported to {}", path.display()),
            Err(e) => format!("Error: {e:#}"),
        });
        result
    }
}

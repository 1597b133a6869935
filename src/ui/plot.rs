use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Spectral plot (central panel)
// ---------------------------------------------------------------------------

/// Render the reflectance plot in the central panel.
pub fn spectral_plot(ui: &mut Ui, state: &ViewerState) {
    let style = &state.style;

    if let Some(title) = &style.title {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(title);
        });
    }

    let series = state.series();
    if series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("All spectra hidden  (tick one in the side panel)");
        });
        return;
    }

    let [x_min, x_max] = style.x_bounds;
    let [y_min, y_max] = style.y_bounds;

    Plot::new("mix_plot")
        .legend(Legend::default().position(style.legend_corner.into()))
        .x_axis_label(style.x_label.as_str())
        .y_axis_label(style.y_label.as_str())
        .include_x(x_min)
        .include_x(x_max)
        .include_y(y_min)
        .include_y(y_max)
        .show_grid(style.show_grid)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in series {
                let points: PlotPoints = s.points.into_iter().collect();

                let mut line = Line::new(points)
                    .name(&s.label)
                    .color(s.color)
                    .width(style.line_width);
                if s.dashed {
                    line = line.style(LineStyle::dashed_loose());
                }

                plot_ui.line(line);
            }
        });
}

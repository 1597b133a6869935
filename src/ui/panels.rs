use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – mixes and endmembers
// ---------------------------------------------------------------------------

/// Render the left panel: one entry per mixed spectrum plus endmember info.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Mixes");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for i in 0..state.mixes.len() {
                let ratio = state.mixes[i].ratio;
                let text = RichText::new(format!("B weight {ratio:.2}")).color(state.colors[i]);

                ui.horizontal(|ui: &mut Ui| {
                    let mut shown = state.visible[i];
                    if ui.checkbox(&mut shown, text).changed() {
                        state.toggle_visible(i);
                    }
                    if ui
                        .selectable_label(state.selected == i, "export")
                        .on_hover_text("Target of File → Export…")
                        .clicked()
                    {
                        state.select(i);
                    }
                });
            }

            ui.separator();
            ui.strong("Endmembers");
            for (sp, label) in state.endmembers.iter().zip(&state.endmember_labels) {
                let (lo, hi) = sp.range();
                ui.label(format!("{label}: {} points, {lo:.3}–{hi:.3}", sp.len()))
                    .on_hover_text(&sp.name);
            }

            ui.separator();
            ui.checkbox(&mut state.style.show_endmembers, "Overlay endmembers");
            ui.checkbox(&mut state.style.show_grid, "Grid");
            ui.checkbox(&mut state.style.dashed, "Dashed mixes");
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} mixed spectra, {} grid points ({})",
            state.mixes.len(),
            state.grid_len(),
            state.grid_kind
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut ViewerState) {
    let ratio = state.mixes[state.selected].ratio;
    let file = rfd::FileDialog::new()
        .set_title("Export mixed spectrum")
        .set_file_name(format!("mix_{ratio:.2}.txt"))
        .add_filter("Text", &["txt", "dat"])
        .save_file();

    if let Some(path) = file {
        match state.export_selected(&path) {
            Ok(()) => log::info!("Exported ratio {ratio} to {}", path.display()),
            Err(e) => log::error!("Failed to export: {e:#}"),
        }
    }
}

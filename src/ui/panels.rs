use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};

use crate::imaging::source::ImageSource;
use crate::scheduler::RefreshInterval;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar – image selection
// ---------------------------------------------------------------------------

/// Render the image selection dropdown and the last error, if any.
///
/// Picking an entry reloads it, even when it is already selected.
pub fn selection_bar(ui: &mut Ui, state: &mut ViewerState, source: &dyn ImageSource) {
    ui.horizontal(|ui: &mut Ui| {
        let mut picked: Option<String> = None;
        egui::ComboBox::from_id_salt("image_selection")
            .selected_text(&state.selected_name)
            .width(320.0)
            .show_ui(ui, |ui: &mut Ui| {
                for name in state.catalog.names() {
                    if ui
                        .selectable_label(state.selected_name == name, name)
                        .clicked()
                    {
                        picked = Some(name.to_owned());
                    }
                }
            });

        if let Some(name) = picked {
            state.select(&name, source);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom bar – zoom readout, refresh controls
// ---------------------------------------------------------------------------

/// Render the control row.
///
/// The Refresh button reloads immediately and leaves the scheduled refresh
/// alone; the interval dropdown only affects the next time the schedule
/// re-arms.
pub fn control_row(ui: &mut Ui, state: &mut ViewerState, source: &dyn ImageSource) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(state.zoom_label());
        if let Some([w, h]) = state.displayed_size() {
            ui.weak(format!("{w}×{h} px"));
        }
        if state.frame_capped() {
            ui.weak("(capped at texture limit)")
                .on_hover_text("The graphics backend cannot hold a larger texture");
        }
        ui.separator();

        let before = state.refresh_interval;
        egui::ComboBox::from_id_salt("refresh_interval")
            .selected_text(state.refresh_interval.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for interval in RefreshInterval::ALL {
                    ui.selectable_value(&mut state.refresh_interval, interval, interval.to_string());
                }
            });
        if state.refresh_interval != before {
            log::info!("Refresh interval set to {}", state.refresh_interval);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            if ui.button("Refresh").clicked() {
                state.reload(source);
            }
            ui.label("Scroll to adjust");
        });
    });
}

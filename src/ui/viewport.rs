use eframe::egui::{self, pos2, Color32, Rect, TextureHandle, Ui};

use crate::state::{ViewerState, ZoomDirection};

// ---------------------------------------------------------------------------
// Wheel input
// ---------------------------------------------------------------------------

/// One zoom step per discrete wheel event this frame, in arrival order.
/// Purely horizontal scrolling is ignored.
pub fn wheel_steps(ctx: &egui::Context) -> Vec<ZoomDirection> {
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::MouseWheel { delta, .. } if delta.y != 0.0 => {
                    Some(ZoomDirection::from_delta(delta.y))
                }
                _ => None,
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Image surface (central panel)
// ---------------------------------------------------------------------------

/// Paint the displayed frame centred in the panel, one texel per physical
/// pixel. Anything larger than the panel is clipped.
pub fn image_surface(ui: &mut Ui, state: &ViewerState, texture: Option<&TextureHandle>) {
    let texture = match texture {
        Some(t) if state.has_image() => t,
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.status_message.is_some() {
                    ui.heading("No image loaded");
                } else {
                    ui.heading("Loading…");
                }
            });
            return;
        }
    };

    let size = texture.size_vec2() / ui.ctx().pixels_per_point();
    let rect = Rect::from_center_size(ui.max_rect().center(), size);
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
}

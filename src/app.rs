use std::time::Instant;

use eframe::egui::{self, TextureHandle, TextureOptions};

use crate::config::ViewerConfig;
use crate::imaging::source::ImageSource;
use crate::scheduler::RefreshScheduler;
use crate::state::ViewerState;
use crate::ui::{panels, viewport};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SunViewerApp {
    pub state: ViewerState,
    scheduler: RefreshScheduler,
    source: Box<dyn ImageSource>,
    /// GPU copy of the displayed frame.
    texture: Option<TextureHandle>,
}

impl SunViewerApp {
    /// Build the viewer, arm the refresh schedule and load the first catalog
    /// entry.
    pub fn new(config: ViewerConfig, source: Box<dyn ImageSource>) -> Self {
        Self::started_at(config, source, Instant::now())
    }

    fn started_at(config: ViewerConfig, source: Box<dyn ImageSource>, now: Instant) -> Self {
        let mut state = ViewerState::new(config.catalog, config.refresh_interval);
        let scheduler = RefreshScheduler::start(now, state.refresh_interval);

        match state.catalog.default_name().map(str::to_owned) {
            Some(name) => state.select(&name, source.as_ref()),
            None => log::warn!("Catalog is empty, nothing to show"),
        }

        Self {
            state,
            scheduler,
            source,
            texture: None,
        }
    }

    /// Reload the current selection if the scheduled deadline has passed.
    /// Returns whether it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let fired = self.scheduler.poll(now, self.state.refresh_interval);
        if fired {
            self.state.reload(self.source.as_ref());
        }
        fired
    }

    /// Replace the texture with the newest rendered frame, if any.
    fn upload_frame(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.state.take_pending_frame() else {
            return;
        };
        if let Some(texture) = &mut self.texture {
            texture.set(frame, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("sun_image", frame, TextureOptions::LINEAR));
        }
    }
}

impl eframe::App for SunViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Scheduled refresh ----
        self.tick(Instant::now());

        self.state
            .set_max_frame_side(ctx.input(|i| i.max_texture_side));

        // ---- Wheel zoom (whole window) ----
        for direction in viewport::wheel_steps(ctx) {
            self.state.apply_zoom(direction);
        }

        // ---- Top panel: image selection ----
        egui::TopBottomPanel::top("selection_bar").show(ctx, |ui| {
            panels::selection_bar(ui, &mut self.state, self.source.as_ref());
        });

        // ---- Bottom panel: zoom readout and refresh controls ----
        egui::TopBottomPanel::bottom("control_row").show(ctx, |ui| {
            panels::control_row(ui, &mut self.state, self.source.as_ref());
        });

        self.upload_frame(ctx);

        // ---- Central panel: image ----
        egui::CentralPanel::default().show(ctx, |ui| {
            viewport::image_surface(ui, &self.state, self.texture.as_ref());
        });

        // Wake up for the next scheduled refresh even if nothing else happens.
        ctx.request_repaint_after(self.scheduler.remaining(Instant::now()));
    }
}

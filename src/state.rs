use eframe::egui::ColorImage;
use image::DynamicImage;

use crate::catalog::ImageCatalog;
use crate::error::ViewerError;
use crate::imaging::codec;
use crate::imaging::source::ImageSource;
use crate::scheduler::RefreshInterval;

/// Multiplicative step applied per wheel event.
pub const ZOOM_STEP: f64 = 1.1;

/// Which way a single wheel notch zooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive deltas zoom in; everything else zooms out.
    pub fn from_delta(delta: f32) -> Self {
        if delta > 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
///
/// All mutation goes through [`ViewerState::load_image`] and
/// [`ViewerState::apply_zoom`], so there is a single writer for the base
/// image and the zoom factor.
pub struct ViewerState {
    /// Name → URL table offered in the dropdown.
    pub catalog: ImageCatalog,

    /// Currently chosen catalog key (empty until the first selection).
    pub selected_name: String,

    /// Full-resolution image for the selection; source for every zoom level.
    base_image: Option<DynamicImage>,

    /// Scale applied to the base image's native size.
    zoom_factor: f64,

    /// Interval the scheduler uses the next time it re-arms.
    pub refresh_interval: RefreshInterval,

    /// Last load error, shown in the UI until the next successful load.
    pub status_message: Option<String>,

    /// Newest rendered frame, waiting to be uploaded as a texture.
    pending_frame: Option<ColorImage>,

    /// Pixel size of the frame currently on screen.
    displayed_size: Option<[usize; 2]>,

    /// Largest frame side the graphics backend can hold as a texture.
    max_frame_side: u32,

    /// The current zoom asks for more than `max_frame_side` allows.
    frame_capped: bool,
}

impl ViewerState {
    pub fn new(catalog: ImageCatalog, refresh_interval: RefreshInterval) -> Self {
        Self {
            catalog,
            selected_name: String::new(),
            base_image: None,
            zoom_factor: 1.0,
            refresh_interval,
            status_message: None,
            pending_frame: None,
            displayed_size: None,
            max_frame_side: codec::DEFAULT_MAX_FRAME_SIDE,
            frame_capped: false,
        }
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn has_image(&self) -> bool {
        self.base_image.is_some()
    }

    #[cfg(test)]
    pub fn base_image(&self) -> Option<&DynamicImage> {
        self.base_image.as_ref()
    }

    pub fn displayed_size(&self) -> Option<[usize; 2]> {
        self.displayed_size
    }

    /// Whether the frame on screen is smaller than the zoom asks for,
    /// because of the texture size limit.
    pub fn frame_capped(&self) -> bool {
        self.frame_capped
    }

    /// Adopt the backend's texture limit, re-rendering if it changed.
    pub fn set_max_frame_side(&mut self, side: usize) {
        let side = u32::try_from(side).unwrap_or(u32::MAX).max(1);
        if side != self.max_frame_side {
            log::debug!("Max frame side set to {side}");
            self.max_frame_side = side;
            self.render();
        }
    }

    /// Zoom readout, e.g. `"133%"`.
    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.zoom_factor * 100.0).round() as i64)
    }

    /// Hand the newest frame to the UI, if one was rendered since last call.
    pub fn take_pending_frame(&mut self) -> Option<ColorImage> {
        self.pending_frame.take()
    }

    /// Fetch, decode and show `name` at 100%.
    ///
    /// An empty name is a no-op. On failure nothing changes: the previous
    /// image and zoom stay on screen.
    pub fn load_image(&mut self, name: &str, source: &dyn ImageSource) -> Result<(), ViewerError> {
        if name.is_empty() {
            return Ok(());
        }
        let url = self
            .catalog
            .url_for(name)
            .ok_or_else(|| ViewerError::UnknownEntry(name.to_owned()))?;

        let bytes = source.fetch(url)?;
        let image = codec::decode(&bytes)?;
        log::info!(
            "Loaded {name:?} ({}x{}, {} bytes)",
            image.width(),
            image.height(),
            bytes.len()
        );

        self.base_image = Some(image);
        self.zoom_factor = 1.0;
        self.status_message = None;
        self.render();
        Ok(())
    }

    /// Change the selection and load it.
    pub fn select(&mut self, name: &str, source: &dyn ImageSource) {
        self.selected_name = name.to_owned();
        self.reload(source);
    }

    /// Load the current selection, reporting any failure instead of
    /// propagating it.
    pub fn reload(&mut self, source: &dyn ImageSource) {
        let name = self.selected_name.clone();
        if let Err(e) = self.load_image(&name, source) {
            log::error!("Failed to load {name:?}: {e}");
            self.status_message = Some(format!("Error: {e}"));
        }
    }

    /// Apply one wheel notch. No-op until an image has been loaded.
    pub fn apply_zoom(&mut self, direction: ZoomDirection) {
        if self.base_image.is_none() {
            return;
        }
        match direction {
            ZoomDirection::In => self.zoom_factor *= ZOOM_STEP,
            ZoomDirection::Out => self.zoom_factor /= ZOOM_STEP,
        }
        self.render();
    }

    /// Rebuild the displayed frame from the base image at the current zoom.
    fn render(&mut self) {
        if let Some(base) = &self.base_image {
            let frame = codec::render(base, self.zoom_factor, self.max_frame_side);
            self.frame_capped = codec::exceeds_limit(
                base.width(),
                base.height(),
                self.zoom_factor,
                self.max_frame_side,
            );
            self.displayed_size = Some(frame.size);
            self.pending_frame = Some(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::imaging::codec::png_bytes;

    /// Serves canned responses keyed by URL; unknown URLs fail like a 404.
    #[derive(Default)]
    struct FakeSource {
        responses: HashMap<String, Vec<u8>>,
    }

    impl FakeSource {
        fn with(mut self, url: &str, bytes: Vec<u8>) -> Self {
            self.responses.insert(url.to_owned(), bytes);
            self
        }
    }

    impl ImageSource for FakeSource {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, ViewerError> {
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| ViewerError::Fetch {
                    url: url.to_owned(),
                    reason: "HTTP 404 Not Found".to_owned(),
                })
        }
    }

    fn catalog() -> ImageCatalog {
        ImageCatalog::new(vec![
            CatalogEntry::new("A", "http://img/a.png"),
            CatalogEntry::new("B", "http://img/b.png"),
            CatalogEntry::new("Broken", "http://img/broken.png"),
            CatalogEntry::new("Missing", "http://img/missing.png"),
        ])
    }

    fn source() -> FakeSource {
        FakeSource::default()
            .with("http://img/a.png", png_bytes(40, 20, [255, 0, 0, 255]))
            .with("http://img/b.png", png_bytes(16, 16, [0, 255, 0, 255]))
            .with("http://img/broken.png", b"definitely not a png".to_vec())
    }

    fn loaded(name: &str) -> ViewerState {
        let mut state = ViewerState::new(catalog(), RefreshInterval::default());
        state.select(name, &source());
        assert!(state.has_image());
        state
    }

    #[test]
    fn starts_empty() {
        let state = ViewerState::new(catalog(), RefreshInterval::default());
        assert!(state.selected_name.is_empty());
        assert!(!state.has_image());
        assert_eq!(state.zoom_factor(), 1.0);
        assert_eq!(state.zoom_label(), "100%");
        assert_eq!(state.refresh_interval, RefreshInterval::FiveMinutes);
    }

    #[test]
    fn successful_load_shows_native_size_at_100_percent() {
        let mut state = loaded("A");
        assert_eq!(state.zoom_factor(), 1.0);
        assert_eq!(state.displayed_size(), Some([40, 20]));
        let frame = state.take_pending_frame().unwrap();
        assert_eq!(frame.size, [40, 20]);
        assert!(state.take_pending_frame().is_none());
    }

    #[test]
    fn empty_name_is_a_no_op() {
        let mut state = ViewerState::new(catalog(), RefreshInterval::default());
        assert!(state.load_image("", &source()).is_ok());
        assert!(!state.has_image());
        assert!(state.take_pending_frame().is_none());
    }

    #[test]
    fn unknown_name_is_reported() {
        let mut state = ViewerState::new(catalog(), RefreshInterval::default());
        let err = state.load_image("Z", &source()).unwrap_err();
        assert!(matches!(err, ViewerError::UnknownEntry(ref n) if n == "Z"));
    }

    #[test]
    fn zoom_steps_are_exact_per_event() {
        let mut state = loaded("A");
        let before = state.zoom_factor();
        state.apply_zoom(ZoomDirection::In);
        assert_eq!(state.zoom_factor(), before * ZOOM_STEP);

        let before = state.zoom_factor();
        state.apply_zoom(ZoomDirection::Out);
        assert_eq!(state.zoom_factor(), before / ZOOM_STEP);
    }

    #[test]
    fn zoom_in_then_out_returns_to_start() {
        let mut state = loaded("A");
        for _ in 0..25 {
            state.apply_zoom(ZoomDirection::In);
        }
        for _ in 0..25 {
            state.apply_zoom(ZoomDirection::Out);
        }
        assert!((state.zoom_factor() - 1.0).abs() < 1e-9);
        assert_eq!(state.zoom_label(), "100%");
    }

    #[test]
    fn zoom_is_not_clamped() {
        let mut state = loaded("B");
        for _ in 0..100 {
            state.apply_zoom(ZoomDirection::Out);
        }
        assert!(state.zoom_factor() < 1e-4);
        assert_eq!(state.zoom_label(), "0%");
        assert_eq!(state.displayed_size(), Some([1, 1]));
    }

    #[test]
    fn zoom_without_image_does_nothing() {
        let mut state = ViewerState::new(catalog(), RefreshInterval::default());
        state.apply_zoom(ZoomDirection::In);
        state.apply_zoom(ZoomDirection::Out);
        assert_eq!(state.zoom_factor(), 1.0);
        assert_eq!(state.zoom_label(), "100%");
        assert!(state.take_pending_frame().is_none());
        assert!(state.displayed_size().is_none());
    }

    #[test]
    fn zoom_rerenders_from_base_image() {
        let mut state = loaded("A");
        state.take_pending_frame();
        state.apply_zoom(ZoomDirection::In);
        // 40 * 1.1 = 44, 20 * 1.1 = 22
        assert_eq!(state.displayed_size(), Some([44, 22]));
        state.apply_zoom(ZoomDirection::Out);
        assert_eq!(state.displayed_size(), Some([40, 20]));
        assert_eq!(state.take_pending_frame().unwrap().size, [40, 20]);
        assert_eq!(state.base_image().map(|b| (b.width(), b.height())), Some((40, 20)));
    }

    #[test]
    fn frame_follows_texture_limit() {
        let mut state = loaded("A");
        state.set_max_frame_side(64);
        state.take_pending_frame();
        assert!(!state.frame_capped());

        for _ in 0..10 {
            state.apply_zoom(ZoomDirection::In);
        }
        // 40 * 1.1^10 ≈ 103.7, limited to 64 on the long side.
        assert!(state.frame_capped());
        assert_eq!(state.displayed_size(), Some([64, 32]));
        assert_eq!(state.zoom_label(), "259%");

        state.set_max_frame_side(16384);
        assert!(!state.frame_capped());
        assert_eq!(state.displayed_size(), Some([104, 52]));
        assert_eq!(state.take_pending_frame().unwrap().size, [104, 52]);

        state.set_max_frame_side(16384);
        assert!(state.take_pending_frame().is_none());
    }

    #[test]
    fn limit_change_without_image_renders_nothing() {
        let mut state = ViewerState::new(catalog(), RefreshInterval::default());
        state.set_max_frame_side(4096);
        assert!(state.take_pending_frame().is_none());
        assert!(state.displayed_size().is_none());
    }

    #[test]
    fn wheel_delta_sign_picks_direction() {
        assert_eq!(ZoomDirection::from_delta(120.0), ZoomDirection::In);
        assert_eq!(ZoomDirection::from_delta(-0.5), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_delta(0.0), ZoomDirection::Out);
    }

    #[test]
    fn three_zoom_ins_then_reload_resets() {
        let mut state = loaded("A");
        for _ in 0..3 {
            state.apply_zoom(ZoomDirection::In);
        }
        assert!((state.zoom_factor() - 1.331).abs() < 1e-12);
        assert_eq!(state.zoom_label(), "133%");

        state.select("A", &source());
        assert_eq!(state.zoom_factor(), 1.0);
        assert_eq!(state.zoom_label(), "100%");
        assert_eq!(state.displayed_size(), Some([40, 20]));
    }

    #[test]
    fn selecting_another_entry_resets_zoom() {
        let mut state = loaded("A");
        state.apply_zoom(ZoomDirection::In);
        state.apply_zoom(ZoomDirection::In);
        state.select("B", &source());
        assert_eq!(state.selected_name, "B");
        assert_eq!(state.zoom_factor(), 1.0);
        assert_eq!(state.displayed_size(), Some([16, 16]));
    }

    #[test]
    fn failed_fetch_keeps_previous_image_and_zoom() {
        let mut state = loaded("A");
        state.apply_zoom(ZoomDirection::In);
        state.take_pending_frame();
        let zoom = state.zoom_factor();

        let err = state.load_image("Missing", &source()).unwrap_err();
        assert!(matches!(err, ViewerError::Fetch { .. }));
        assert_eq!(state.zoom_factor(), zoom);
        assert_eq!(state.base_image().map(|b| b.width()), Some(40));
        assert_eq!(state.displayed_size(), Some([44, 22]));
        assert!(state.take_pending_frame().is_none());
    }

    #[test]
    fn failed_decode_keeps_previous_image_and_reports() {
        let mut state = loaded("A");
        state.take_pending_frame();

        state.select("Broken", &source());
        assert_eq!(state.selected_name, "Broken");
        assert_eq!(state.base_image().map(|b| b.width()), Some(40));
        assert_eq!(state.zoom_factor(), 1.0);
        assert!(state.take_pending_frame().is_none());
        let msg = state.status_message.clone().unwrap();
        assert!(msg.contains("decode"), "{msg}");
    }

    #[test]
    fn success_clears_status_message() {
        let mut state = loaded("A");
        state.select("Missing", &source());
        assert!(state.status_message.is_some());
        state.select("B", &source());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failure_before_first_image_leaves_state_empty() {
        let mut state = ViewerState::new(catalog(), RefreshInterval::default());
        state.select("Missing", &source());
        assert!(!state.has_image());
        assert!(state.status_message.is_some());
        state.apply_zoom(ZoomDirection::In);
        assert_eq!(state.zoom_factor(), 1.0);
    }
}

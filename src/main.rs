mod app;
mod catalog;
mod config;
mod error;
mod imaging;
mod scheduler;
mod state;
mod ui;

use std::path::Path;

use app::SunViewerApp;
use config::ViewerConfig;
use eframe::egui;
use imaging::source::HttpSource;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load_or_default(Path::new(config::CONFIG_FILE));
    log::info!(
        "Catalog has {} entries, refreshing every {}",
        config.catalog.len(),
        config.refresh_interval
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 1250.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Sun Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(SunViewerApp::new(config, Box::new(HttpSource))))),
    );
    log::info!("Sun Viewer window closed");
    result
}

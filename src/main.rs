mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::MaritimeBoardApp;
use eframe::egui;
use maritime_board::config::AppConfig;

fn main() -> eframe::Result {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    env_logger::init();

    let mut config = AppConfig::from_env();
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = Some(PathBuf::from(path));
    }
    log::debug!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Maritime Imports Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(MaritimeBoardApp::new(cc, config)))),
    )
}

mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::LeagueTableApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("Invalid configuration, falling back to defaults: {e:#}");
            DashboardConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Premier League Table",
        options,
        Box::new(|_cc| Ok(Box::new(LeagueTableApp::new(config)))),
    )
}

mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::DashboardApp;
use clap::Parser;
use config::{Cli, ViewSettings};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::new(ViewSettings::from(&cli), cli.mode);
    if let Some(path) = &cli.path {
        ui::panels::load_path(&mut state, path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "India Change Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}

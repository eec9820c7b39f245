mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;

use app::TradeDashboardApp;
use config::{Cli, DashboardConfig};
use state::{load_sample, AppState};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = DashboardConfig::from(Cli::parse());
    log::info!("Starting with {config:?}");

    // A missing file or an oversize sample aborts before the window opens.
    let sample = load_sample(&config.input, &config)?;
    let mut state = AppState::new(config);
    state.set_sample(sample);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard for Imports and Exports",
        options,
        Box::new(|_cc| Ok(Box::new(TradeDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}

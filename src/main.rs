//! Coffee & Health Explorer - interactive dashboard over the coffee/health survey CSV.

use anyhow::Context;
use coffee_health_explorer::gui::DashboardApp;
use coffee_health_explorer::{DashboardConfig, DataLoader};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load().context("Failed to load dashboard configuration")?;
    let dataset = DataLoader::load_csv(&config.data_path)
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Coffee & Health Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Coffee & Health Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dataset, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start window: {e}"))
}

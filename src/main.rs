mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::CarbonDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();

    // The dashboard never opens on a partial table.
    let table = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("failed to load {}: {e}", config.data_path.display()))
        .with_context(|| format!("loading emissions table from {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} rows: {} countries, years {:?}",
        table.len(),
        table.countries().len(),
        table.years()
    );
    if table.is_empty() {
        log::warn!("{} has no rows, every chart will be empty", config.data_path.display());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.heading.clone();
    let dark_theme = config.dark_theme;
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if dark_theme {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            }
            Ok(Box::new(CarbonDashApp::new(AppState::new(table), config.heading)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI host failed: {e}"))
}

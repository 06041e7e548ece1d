mod app;
mod ui;

use app::CropYieldApp;
use crop_yield_dashboard::config::DashboardConfig;
use crop_yield_dashboard::data::store;
use crop_yield_dashboard::state::AppState;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env();
    let mut state = AppState::new(config.views);

    // The only disk read of the process.
    match store::init(&config.data_path) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("Failed to load {}: {e}", config.data_path.display());
            state.set_load_error(&e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Crop Yield Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CropYieldApp::new(state)))),
    )
}

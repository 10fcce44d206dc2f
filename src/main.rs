//! Global Health Analytics - Linked Interactive Chart Dashboard
//!
//! Joins per-country demographic data with life-expectancy time series and
//! renders four linked charts with region filtering and box-select brushing.

mod charts;
mod data;
mod gui;

use data::LoaderConfig;
use eframe::egui;
use gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Load and join both datasets once; any failure here is fatal.
    let config = LoaderConfig::default();
    let dataset = match data::load_dataset(&config) {
        Ok(records) => {
            log::info!("Loaded {} countries after join", records.len());
            records
        }
        Err(e) => {
            log::error!("Failed to load dataset: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Global Health Analytics"),
        ..Default::default()
    };

    eframe::run_native(
        "Global Health Analytics",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dataset)))),
    )
}

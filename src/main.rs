mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::ListingLensApp;
use eframe::egui;

/// Dataset loaded when no path is given on the command line.
const DEFAULT_DATA_PATH: &str = "cleaned_listings.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("loading listings from {}", path.display()))?;
    if dataset.is_empty() {
        log::warn!("{} contains no listings", path.display());
    }
    log::info!(
        "Loaded {} listings across {} neighbourhood groups",
        dataset.len(),
        dataset.neighbourhood_groups.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Listing Lens – Rental Listings Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(ListingLensApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the UI: {e}"))
}

use anyhow::Context;
use eframe::egui;
use log::{info, warn};

use treasure_hunt::ui::app::TreasureApp;
use treasure_hunt::ui::settings::UiSettings;
use treasure_hunt::ui::settings_io;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match settings_io::load_settings().context("loading UI settings") {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{e:#}; using defaults");
            UiSettings::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Treasure Hunt")
            .with_inner_size([1040.0, 720.0]),
        ..Default::default()
    };

    info!("starting treasure hunt");
    eframe::run_native(
        "Treasure Hunt",
        options,
        Box::new(move |_cc| Ok(Box::new(TreasureApp::new(settings)?))),
    )
}

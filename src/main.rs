#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based PrediFix dashboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use predifix::config::{self, AppSettings};
use predifix::dashboard::{APP_TITLE, DashboardApp, MIN_VIEWPORT_SIZE};
use predifix::logging;
use predifix::pipeline::Artifacts;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_error) = match config::load_or_default() {
        Ok(settings) => (settings, None),
        Err(err) => (AppSettings::default(), Some(err)),
    };
    if let Err(err) = logging::init(&settings.logging) {
        eprintln!("Logging disabled: {err}");
    }
    if let Some(err) = config_error {
        tracing::warn!("Falling back to default settings: {err}");
    }

    // Artifact load failure is fatal; no window is opened.
    let artifacts = Artifacts::from_settings(&settings.artifacts).inspect_err(|err| {
        tracing::error!("Failed to load model artifacts: {err}");
    })?;

    let viewport = egui::ViewportBuilder::default()
        .with_title(APP_TITLE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(1280.0, 860.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let ui_settings = settings.ui.clone();
    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(artifacts, ui_settings)))),
    )?;
    Ok(())
}

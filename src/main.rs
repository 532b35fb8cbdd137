//! Ledgerdesk - company settings client for an invoicing application
//!
//! Shows the company's resolved logo and name and edits its custom fields.

mod app;
mod core;
mod ui;

use app::LedgerdeskApp;
use crate::core::config::AppConfig;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Ledgerdesk...");

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {}", e);
        AppConfig::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Ledgerdesk"),
        ..Default::default()
    };

    eframe::run_native(
        "Ledgerdesk",
        native_options,
        Box::new(|cc| Ok(Box::new(LedgerdeskApp::new(cc, config)))),
    )
}

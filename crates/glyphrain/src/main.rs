mod app;
mod cli;
mod debug_info;
mod logging;
mod menu;
mod update;

use clap::Parser;
use glyphrain_config::{ConfigStore, default_log_path};
use glyphrain_engine::RainEngine;

use crate::app::{App, AppOptions, ExitReason};
use crate::cli::Cli;
use crate::debug_info::DebugReport;
use crate::update::UpdateMonitor;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.debug_enabled()
        && let Some(path) = cli.log_file.clone().or_else(default_log_path)
    {
        logging::init(&path)?;
    }

    let store = match cli.config.clone() {
        Some(path) => Some(ConfigStore::new(path)),
        None => ConfigStore::default_location()
            .inspect_err(|e| log::warn!("{e}; settings will not be saved"))
            .ok(),
    };
    let (settings, load_error) = store
        .as_ref()
        .map(ConfigStore::load_or_default)
        .unwrap_or_default();

    if cli.debug_enabled() {
        let report = DebugReport::collect(store.as_ref().map(ConfigStore::path), None);
        for line in report.lines() {
            log::info!("{line}");
        }
    }

    let engine = cli.seed.map(RainEngine::seeded).unwrap_or_default();
    let updates = UpdateMonitor::new(env!("CARGO_PKG_VERSION"));
    if !cli.no_update_check {
        updates.start();
    }

    let mut app = App::new(
        settings,
        engine,
        store,
        updates,
        AppOptions {
            fit_terminal: cli.fit,
            show_intro: !cli.no_intro,
        },
    );
    if let Some(e) = load_error {
        app.notify(format!("Settings file ignored, using defaults: {e}"));
    }

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();

    if result? == ExitReason::DurationReached {
        println!("Duration reached. Exiting...");
    }
    println!("glyphrain terminated. Goodbye!");
    Ok(())
}

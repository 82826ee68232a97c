//! mudlink entry point.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use clap::Parser;
use mudlink_tui::{App, Args, Runtime, SettingsStore, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }

    let store = args.settings_file.clone().map_or_else(SettingsStore::platform, SettingsStore::at);
    let settings = store.load();
    tracing::info!(settings = %store.path().display(), "mudlink starting");

    let app = App::new(args.app_config(settings));
    let driver = TerminalDriver::new(store)?;

    Ok(Runtime::new(driver, app).run().await?)
}

/// Log to a file; the terminal itself is taken by the UI.
fn init_logging(path: &Path, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

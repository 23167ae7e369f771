//! PocketDrop desktop entry point.

mod app;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting PocketDrop");

    let config = config_from_env();
    tracing::info!(
        port = config.port,
        upload_dir = %config.upload_dir.display(),
        "configuration loaded"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config))?;

    tracing::info!("shut down cleanly");
    Ok(())
}

fn config_from_env() -> app::Config {
    let port = match std::env::var("POCKETDROP_PORT") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(%raw, "invalid POCKETDROP_PORT, using default");
            app::DEFAULT_PORT
        }),
        Err(_) => app::DEFAULT_PORT,
    };

    let upload_dir = std::env::var("POCKETDROP_UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("uploads"));

    let preferences_path = std::env::var("POCKETDROP_PREFS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(pocketdrop_preferences::DEFAULT_FILE_NAME));

    app::Config {
        port,
        upload_dir,
        preferences_path,
    }
}

//! # secret-sync
//!
//! Command-line entry point. See [`secret_sync::cli`] for the two modes.

use anyhow::{Context, Result};
use clap::Parser;
use secret_sync::cli::{self, Cli};
use secret_sync::config::RuntimeConfig;
use secret_sync::observability::{init_logging, metrics};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut runtime_config = RuntimeConfig::from_env();
    if cli.metrics_file.is_some() {
        runtime_config.metrics_file = cli.metrics_file.clone();
    }

    init_logging(&runtime_config)?;
    info!(
        "Starting secret-sync v{} (built {}, git {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    metrics::register_metrics()?;

    let result = match cli::resolve_config(cli.command) {
        Ok(config) => cli::execute(config).await,
        Err(e) => Err(e),
    };

    if let Some(path) = &runtime_config.metrics_file {
        if let Err(e) = metrics::write_to_file(path) {
            error!("Failed to write metrics to {}: {:#}", path.display(), e);
        }
    }

    result.context("Sync failed")
}

//! # Logging
//!
//! Installs the global `tracing` subscriber for the binary.
//!
//! Log lines go to stderr; stdout is reserved for the change set preview.

use crate::config::RuntimeConfig;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter directive for a log level, scoped to this crate
fn default_directive(log_level: &str) -> String {
    format!("secret_sync={}", log_level.trim().to_lowercase())
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence over `LOG_LEVEL` when set.
pub fn init_logging(config: &RuntimeConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.is_json() {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    } else {
        builder
            .with_ansi(config.log_enable_color)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("INFO"), "secret_sync=info");
        assert_eq!(default_directive(" Debug "), "secret_sync=debug");
    }
}

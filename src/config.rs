//! # Configuration
//!
//! - [`SyncConfig`]: everything one sync run needs, passed explicitly to the orchestrator
//! - [`RuntimeConfig`]: process-level settings (logging, metrics output) loaded from environment variables

use crate::constants::{DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Static AWS access key pair
///
/// Wiped from memory on drop and redacted from `Debug` output.
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct AwsCredentials {
    // Per-field defaults: a container default would move out of a Drop type
    #[serde(default)]
    pub aws_access_key_id: String,
    #[serde(default)]
    pub aws_secret_access_key: String,
}

impl AwsCredentials {
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            aws_access_key_id: access_key_id.into(),
            aws_secret_access_key: secret_access_key.into(),
        }
    }
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("aws_secret_access_key", &"***")
            .finish()
    }
}

/// Configuration for a single sync run
///
/// Produced by a front end (command line, CI inputs, YAML file) and handed to
/// [`crate::orchestrator::Orchestrator::new`]. Nothing in the core reads the
/// environment; every input arrives through this value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    #[serde(flatten)]
    pub credentials: AwsCredentials,
    pub aws_region: String,
    /// Custom service endpoint (LocalStack and similar)
    pub endpoint_url: Option<String>,
    pub secret_name: String,
    /// Desired-state JSON file; not required when deleting
    pub json_file_path: Option<PathBuf>,
    /// Regular expressions; a key matching any of them is left untouched
    pub exclude: Vec<String>,
    pub show_values: bool,
    pub create_secret: bool,
    pub delete_secret: bool,
    /// Preview only; the caller skips apply
    pub dry_run: bool,
}

impl SyncConfig {
    /// Load a configuration file (YAML)
    ///
    /// Missing fields take their defaults; front ends overlay their own inputs afterwards.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Process-level settings
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
    /// Write Prometheus text exposition here after the run
    pub metrics_file: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            log_enable_color: true,
            metrics_file: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env_var_or_default_str("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            log_format: env_var_or_default_str("LOG_FORMAT", DEFAULT_LOG_FORMAT),
            log_enable_color: env_var_or_default_bool("LOG_ENABLE_COLOR", true),
            metrics_file: std::env::var("METRICS_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Read environment variable as boolean or return default
fn env_var_or_default_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read environment variable as string or return default
fn env_var_or_default_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = AwsCredentials::new("AKIAEXAMPLE", "very-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("AKIAEXAMPLE"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_sync_config_from_yaml() {
        let yaml = r"
aws_access_key_id: AKIAEXAMPLE
aws_secret_access_key: secret
aws_region: eu-west-1
secret_name: app/prod
json_file_path: secrets.json
exclude:
  - '^_'
  - '^local\.'
show_values: true
";
        let config = SyncConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.credentials.aws_access_key_id, "AKIAEXAMPLE");
        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.secret_name, "app/prod");
        assert_eq!(config.json_file_path, Some(PathBuf::from("secrets.json")));
        assert_eq!(config.exclude, vec!["^_".to_string(), r"^local\.".to_string()]);
        assert!(config.show_values);
        assert!(!config.create_secret);
        assert!(!config.delete_secret);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_sync_config_from_empty_yaml() {
        let config = SyncConfig::from_yaml_str("  \n").unwrap();
        assert!(config.secret_name.is_empty());
        assert!(config.exclude.is_empty());
        assert!(config.json_file_path.is_none());
    }

    #[test]
    fn test_sync_config_without_credentials() {
        let yaml = "aws_region: eu-west-1\nsecret_name: app/prod\ndelete_secret: true\n";
        let config = SyncConfig::from_yaml_str(yaml).unwrap();
        assert!(config.credentials.aws_access_key_id.is_empty());
        assert!(config.credentials.aws_secret_access_key.is_empty());
        assert_eq!(config.secret_name, "app/prod");
        assert!(config.delete_secret);
    }

    #[test]
    fn test_sync_config_with_one_credential_key() {
        let config = SyncConfig::from_yaml_str("aws_access_key_id: AKIAEXAMPLE\n").unwrap();
        assert_eq!(config.credentials.aws_access_key_id, "AKIAEXAMPLE");
        assert!(config.credentials.aws_secret_access_key.is_empty());
    }

    #[test]
    fn test_runtime_config_default() {
        let config = RuntimeConfig::default();
        assert_eq!(config.log_level, "INFO");
        assert!(!config.is_json());
        assert!(config.metrics_file.is_none());
    }
}

//! # Command-Line Arguments
//!
//! ```bash
//! # Preview, then apply
//! secret-sync sync my-app/prod --file secrets.json --aws-region eu-west-1
//!
//! # Preview only, values visible
//! secret-sync sync my-app/prod --file secrets.json --show-values --dry-run
//!
//! # Run inside a GitHub Actions step
//! secret-sync action
//! ```

use crate::config::SyncConfig;
use crate::constants::DEFAULT_CLI_EXCLUDE_PATTERN;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sync a flat JSON file into an AWS Secrets Manager secret
#[derive(Debug, Parser)]
#[command(name = "secret-sync", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Write Prometheus metrics (text format) to this file when the run ends
    #[arg(long, global = true, env = "METRICS_FILE")]
    pub metrics_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync secrets file
    Sync(SyncArgs),
    /// Run as a GitHub Action, reading inputs from INPUT_* variables
    Action,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Secret name
    pub secret_name: String,

    /// Path to json file to be synced
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Create secret if not exists
    #[arg(long)]
    pub create_secret: bool,

    /// Delete the secret instead of syncing it
    #[arg(long)]
    pub delete_secret: bool,

    /// Show secret values when viewing change set
    #[arg(long)]
    pub show_values: bool,

    /// Preview changes without modifying the secret
    #[arg(long)]
    pub dry_run: bool,

    /// AWS Access key id
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub aws_access_key: Option<String>,

    /// AWS Secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub aws_secret_key: Option<String>,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub aws_region: Option<String>,

    /// Custom Secrets Manager endpoint (LocalStack)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Regular expression to match keys to be excluded from sync (repeatable, default "^_")
    #[arg(long)]
    pub exclude: Vec<String>,

    /// YAML file with base settings; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SyncArgs {
    /// Build the run configuration: config file first, then flags on top
    pub fn into_config(self) -> Result<SyncConfig> {
        let SyncArgs {
            secret_name,
            file,
            create_secret,
            delete_secret,
            show_values,
            dry_run,
            aws_access_key,
            aws_secret_key,
            aws_region,
            endpoint_url,
            exclude,
            config,
        } = self;

        let mut sync_config = match config {
            Some(path) => SyncConfig::from_yaml_file(&path)?,
            None => SyncConfig::default(),
        };

        sync_config.secret_name = secret_name;
        if let Some(path) = file {
            sync_config.json_file_path = Some(path);
        }
        if let Some(key) = aws_access_key {
            sync_config.credentials.aws_access_key_id = key;
        }
        if let Some(key) = aws_secret_key {
            sync_config.credentials.aws_secret_access_key = key;
        }
        if let Some(region) = aws_region {
            sync_config.aws_region = region;
        }
        if endpoint_url.is_some() {
            sync_config.endpoint_url = endpoint_url;
        }

        if !exclude.is_empty() {
            sync_config.exclude = exclude;
        } else if sync_config.exclude.is_empty() {
            sync_config.exclude = vec![DEFAULT_CLI_EXCLUDE_PATTERN.to_string()];
        }

        sync_config.create_secret |= create_secret;
        sync_config.delete_secret |= delete_secret;
        sync_config.show_values |= show_values;
        sync_config.dry_run |= dry_run;

        Ok(sync_config)
    }
}

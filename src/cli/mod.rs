//! # Front End
//!
//! Turns command-line flags or action inputs into a [`SyncConfig`], runs
//! the orchestrator, prints the change set, then applies it unless this is
//! a dry run.

pub mod action;
pub mod args;

pub use args::{Cli, Command, SyncArgs};

use crate::config::SyncConfig;
use crate::orchestrator::Orchestrator;
use crate::provider::AwsSecretsManager;
use crate::reconciler::SyncMode;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Resolve the configuration for a parsed command
pub fn resolve_config(command: Command) -> Result<SyncConfig> {
    match command {
        Command::Sync(args) => args.into_config(),
        Command::Action => Ok(action::config_from_env()),
    }
}

/// Run one sync against AWS Secrets Manager
pub async fn execute(config: SyncConfig) -> Result<()> {
    let store = Arc::new(AwsSecretsManager::new(&config).await);
    let orchestrator = Orchestrator::new(config, store).context("Invalid configuration")?;

    let mut stdout = std::io::stdout();
    report_and_apply(&orchestrator, &mut stdout).await
}

/// Print every change description, then apply unless the run is a dry run
pub async fn report_and_apply<W: Write>(orchestrator: &Orchestrator, out: &mut W) -> Result<()> {
    let secret_name = orchestrator.config().secret_name.clone();
    let change_set = orchestrator
        .run()
        .await
        .with_context(|| format!("Failed to compute changes for secret {secret_name}"))?;

    for description in change_set.descriptions() {
        writeln!(out, "{description}")?;
    }

    if orchestrator.config().dry_run {
        info!("Dry run, secret {} left unchanged", secret_name);
        return Ok(());
    }

    orchestrator
        .apply(&change_set)
        .await
        .with_context(|| format!("Failed to apply changes to secret {secret_name}"))?;
    match change_set.mode() {
        SyncMode::Delete => writeln!(out, "Secret {secret_name} deleted")?,
        SyncMode::Update => writeln!(out, "Secret {secret_name} synced")?,
    }

    Ok(())
}

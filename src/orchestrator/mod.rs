//! # Orchestrator
//!
//! Sequences one sync run:
//!
//! ```text
//! Validate -> [CreateIfMissing] -> (Delete | FetchAndDiff) -> Ready
//! ```
//!
//! - **Validate**: in [`Orchestrator::new`] and again at the start of every run, before any I/O
//! - **CreateIfMissing**: only with `create_secret` and without `delete_secret`
//! - **Delete**: no fetch, no file read; the change set routes apply to the store's delete
//! - **FetchAndDiff**: fetch current state, load desired state, reconcile
//!
//! Every step is awaited before the next starts; a run performs at most one
//! store read and one store write.

mod validation;

pub use validation::validate_config;

use crate::config::SyncConfig;
use crate::error::{SyncError, ValidationError};
use crate::observability::metrics;
use crate::parser::load_desired_state;
use crate::provider::SecretStore;
use crate::reconciler::{self, ChangeSet, SkipPolicy, SyncMode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, Instrument};

pub struct Orchestrator {
    config: SyncConfig,
    skip_policy: SkipPolicy,
    store: Arc<dyn SecretStore>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("skip_policy", &self.skip_policy)
            .field("store", &self.store.name())
            .finish()
    }
}

impl Orchestrator {
    /// Validate `config` and bind it to `store`
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a missing field, a missing
    /// desired-state file, or an exclude pattern that does not compile.
    pub fn new(config: SyncConfig, store: Arc<dyn SecretStore>) -> Result<Self, ValidationError> {
        validate_config(&config)?;
        let skip_policy = SkipPolicy::from_patterns(&config.exclude)?;

        Ok(Self {
            config,
            skip_policy,
            store,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    #[must_use]
    pub fn skip_policy(&self) -> &SkipPolicy {
        &self.skip_policy
    }

    /// Swap the store between runs
    pub fn set_store(&mut self, store: Arc<dyn SecretStore>) {
        self.store = store;
    }

    /// Build the change set for this configuration
    ///
    /// # Errors
    ///
    /// Store failures are returned unchanged; desired-state read and parse
    /// failures carry the file path.
    pub async fn run(&self) -> Result<ChangeSet, SyncError> {
        let span = info_span!(
            "sync.run",
            secret.name = %self.config.secret_name,
            delete = self.config.delete_secret,
            create = self.config.create_secret,
        );
        let start = Instant::now();
        metrics::increment_runs();

        let result = self.run_steps().instrument(span).await;

        metrics::observe_run_duration(start.elapsed().as_secs_f64());
        match &result {
            Ok(change_set) => {
                for record in change_set.records() {
                    metrics::record_changes(record.kind.as_str(), 1);
                }
                info!(
                    "Change set for secret {} ready: {}",
                    self.config.secret_name,
                    change_set.summary()
                );
            }
            Err(_) => metrics::increment_run_errors(),
        }

        result
    }

    async fn run_steps(&self) -> Result<ChangeSet, SyncError> {
        // The desired-state file may have changed since construction
        validate_config(&self.config)?;

        if self.config.create_secret && !self.config.delete_secret {
            self.ensure_secret_exists().await?;
        }

        if self.config.delete_secret {
            info!(
                "Delete requested for secret {}, skipping fetch and diff",
                self.config.secret_name
            );
            return Ok(ChangeSet::deletion());
        }

        let path = validation::desired_state_path(&self.config)?;

        let current = self.store.get_values().await?;
        debug!("Current state has {} keys", current.len());

        let desired = load_desired_state(&path).await?;
        debug!("Desired state has {} keys", desired.len());

        Ok(reconciler::compute(
            &desired,
            &current,
            &self.skip_policy,
            self.config.show_values,
        ))
    }

    async fn ensure_secret_exists(&self) -> Result<(), SyncError> {
        if self.store.exists().await? {
            debug!("Secret {} already exists", self.config.secret_name);
            return Ok(());
        }

        info!(
            "Secret {} does not exist, creating it",
            self.config.secret_name
        );
        self.store.create().await?;
        Ok(())
    }

    /// Apply a change set to the store in one call
    ///
    /// Update mode writes the merged state; delete mode deletes the secret.
    ///
    /// # Errors
    ///
    /// [`SyncError::EmptyPayload`] when an update would leave the secret
    /// empty; the store is not called in that case.
    pub async fn apply(&self, change_set: &ChangeSet) -> Result<(), SyncError> {
        let span = info_span!(
            "sync.apply",
            secret.name = %self.config.secret_name,
            mode = change_set.mode().as_str(),
        );

        async {
            match change_set.mode() {
                SyncMode::Delete => {
                    self.store.delete().await?;
                    info!("Secret {} deleted", self.config.secret_name);
                }
                SyncMode::Update => {
                    if change_set.merged_state().is_empty() {
                        return Err(SyncError::EmptyPayload);
                    }
                    self.store.update(change_set.merged_state()).await?;
                    info!(
                        "Secret {} updated with {} keys",
                        self.config.secret_name,
                        change_set.merged_state().len()
                    );
                }
            }
            metrics::increment_applies(change_set.mode().as_str());
            Ok::<(), SyncError>(())
        }
        .instrument(span)
        .await
    }
}

//! # secret-sync
//!
//! Keeps one AWS Secrets Manager secret in sync with a flat JSON file.
//!
//! A run reads the secret's current key/value payload, diffs it against the
//! desired state from the file, previews the result as an ordered change set
//! and, unless it is a dry run, writes the merged payload back in a single
//! update.
//!
//! ```text
//! SyncConfig -> Orchestrator::run -> ChangeSet -> (print) -> Orchestrator::apply
//!                    |                                          |
//!              SecretStore::get_values                  SecretStore::update
//! ```
//!
//! Keys matching an exclude pattern are reported as skipped and never
//! touched. Values are masked in change descriptions unless `show_values`
//! is set.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod observability;
pub mod orchestrator;
pub mod parser;
pub mod provider;
pub mod reconciler;

/// Flat key/value payload of a secret, in insertion order
pub type SecretPayload = indexmap::IndexMap<String, String>;

pub use config::{AwsCredentials, RuntimeConfig, SyncConfig};
pub use error::{StoreError, SyncError, ValidationError};
pub use orchestrator::Orchestrator;
pub use provider::{AwsSecretsManager, InMemorySecretStore, SecretStore};
pub use reconciler::{ChangeKind, ChangeRecord, ChangeSet, ChangeSummary, SkipPolicy, SyncMode};

//! # Errors
//!
//! Error taxonomy for a sync run.
//!
//! - [`ValidationError`]: configuration problems, raised before any I/O
//! - [`StoreError`]: anything the secret store adapter reports
//! - [`SyncError`]: the union surfaced by the orchestrator

use std::path::PathBuf;
use thiserror::Error;

/// Missing or malformed configuration
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing aws_access_key_id")]
    MissingAccessKeyId,
    #[error("Missing aws_secret_access_key")]
    MissingSecretAccessKey,
    #[error("Missing aws_region")]
    MissingRegion,
    #[error("Missing secret_name")]
    MissingSecretName,
    #[error("Missing json_file_path")]
    MissingJsonFilePath,
    #[error("JSON file does not exist at path: {}", .0.display())]
    JsonFileNotFound(PathBuf),
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidSkipPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure reported by a secret store adapter
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Secret '{0}' not found")]
    NotFound(String),
    #[error("Secret store {operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
    #[error("Secret payload is not a flat JSON object of string values: {0}")]
    InvalidPayload(String),
    #[error("empty new secrets")]
    EmptyPayload,
}

/// Error surfaced by [`crate::orchestrator::Orchestrator`]
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to read desired state from {}: {source}", path.display())]
    DesiredStateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse desired state from {}: {source}", path.display())]
    DesiredStateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Refusing to apply an empty payload: the merged secret has no keys")]
    EmptyPayload,
}

impl SyncError {
    /// Whether the error was raised before any network call
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, SyncError::Validation(_))
    }
}

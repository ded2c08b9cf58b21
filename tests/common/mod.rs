//! Common test utilities
//!
//! Builders for payloads, desired-state files and valid configurations.

#![allow(dead_code, reason = "Each test binary uses a different subset")]

use secret_sync::{AwsCredentials, SecretPayload, SyncConfig};
use std::io::Write;
use tempfile::NamedTempFile;

pub const SECRET_NAME: &str = "my-app/test";

pub fn payload(pairs: &[(&str, &str)]) -> SecretPayload {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Write `json` to a temp file; the file lives as long as the handle
pub fn desired_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes())
        .expect("Failed to write desired state");
    file
}

/// Valid configuration pointing at `file`
pub fn sync_config(file: &NamedTempFile) -> SyncConfig {
    SyncConfig {
        credentials: AwsCredentials::new("AKIAEXAMPLE", "secret"),
        aws_region: "us-east-1".to_string(),
        secret_name: SECRET_NAME.to_string(),
        json_file_path: Some(file.path().to_path_buf()),
        ..SyncConfig::default()
    }
}

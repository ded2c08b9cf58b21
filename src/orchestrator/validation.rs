//! # Configuration Validation
//!
//! Fail-fast checks run before any file read or store call. Each missing
//! field has its own error so CI output points at the exact input.

use crate::config::SyncConfig;
use crate::error::ValidationError;
use std::path::PathBuf;

/// Blank means absent: empty or whitespace-only
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a sync configuration
///
/// Checks, in order: access key id, secret access key, region, secret name,
/// then (unless deleting) that a desired-state path is given and exists.
pub fn validate_config(config: &SyncConfig) -> Result<(), ValidationError> {
    if is_blank(&config.credentials.aws_access_key_id) {
        return Err(ValidationError::MissingAccessKeyId);
    }

    if is_blank(&config.credentials.aws_secret_access_key) {
        return Err(ValidationError::MissingSecretAccessKey);
    }

    if is_blank(&config.aws_region) {
        return Err(ValidationError::MissingRegion);
    }

    if is_blank(&config.secret_name) {
        return Err(ValidationError::MissingSecretName);
    }

    // Deleting never reads the desired state
    if config.delete_secret {
        return Ok(());
    }

    let path = desired_state_path(config)?;
    if !path.exists() {
        return Err(ValidationError::JsonFileNotFound(path));
    }

    Ok(())
}

/// Desired-state path, or the error for a missing one
pub(crate) fn desired_state_path(config: &SyncConfig) -> Result<PathBuf, ValidationError> {
    config
        .json_file_path
        .as_ref()
        .filter(|p| !is_blank(&p.to_string_lossy()))
        .cloned()
        .ok_or(ValidationError::MissingJsonFilePath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AwsCredentials;

    fn valid_config(path: PathBuf) -> SyncConfig {
        SyncConfig {
            credentials: AwsCredentials::new("keyId", "secretKey"),
            aws_region: "region".to_string(),
            secret_name: "secretName".to_string(),
            json_file_path: Some(path),
            ..SyncConfig::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(validate_config(&valid_config(file.path().to_path_buf())).is_ok());
    }

    #[test]
    fn test_blank_is_missing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = valid_config(file.path().to_path_buf());
        config.aws_region = "   ".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::MissingRegion)
        ));
    }

    #[test]
    fn test_checks_run_in_order() {
        // Everything missing: the access key is reported first
        let config = SyncConfig::default();
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::MissingAccessKeyId)
        ));
    }

    #[test]
    fn test_empty_path_is_missing() {
        let config = valid_config(PathBuf::new());
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::MissingJsonFilePath)
        ));
    }

    #[test]
    fn test_delete_does_not_need_a_file() {
        let mut config = valid_config(PathBuf::from("/nonexistent/secrets.json"));
        config.delete_secret = true;
        assert!(validate_config(&config).is_ok());

        config.json_file_path = None;
        assert!(validate_config(&config).is_ok());
    }
}

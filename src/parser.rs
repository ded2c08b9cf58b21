//! # Desired State Parser
//!
//! Loads the desired-state file: a flat UTF-8 JSON object of string keys to
//! string values. Key order in the file is preserved, which is what makes the
//! change set order reproducible.

use crate::error::SyncError;
use crate::SecretPayload;
use std::path::Path;
use tracing::debug;

/// Parse desired state from JSON text
pub fn parse_desired_state(content: &str) -> Result<SecretPayload, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse the desired-state file
pub async fn load_desired_state(path: &Path) -> Result<SecretPayload, SyncError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SyncError::DesiredStateRead {
                path: path.to_path_buf(),
                source,
            })?;

    let payload = parse_desired_state(&content).map_err(|source| SyncError::DesiredStateParse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        keys = payload.len(),
        "Loaded desired state"
    );

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_preserves_file_order() {
        let payload = parse_desired_state(r#"{"zeta": "1", "alpha": "2", "mid": "3"}"#).unwrap();
        let keys: Vec<&str> = payload.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_empty_object() {
        let payload = parse_desired_state("{}").unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_parse_duplicate_key_last_value_wins() {
        let payload = parse_desired_state(r#"{"a": "1", "b": "2", "a": "3"}"#).unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["a"], "3");
        assert_eq!(payload.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
    }

    #[test]
    fn test_parse_rejects_non_string_values() {
        assert!(parse_desired_state(r#"{"port": 5432}"#).is_err());
        assert!(parse_desired_state(r#"{"nested": {"a": "b"}}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_desired_state(r#"["a", "b"]"#).is_err());
        assert!(parse_desired_state("not json").is_err());
    }

    #[tokio::test]
    async fn test_load_desired_state_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"key1": "value1", "key2": "value2"}}"#).unwrap();

        let payload = load_desired_state(file.path()).await.unwrap();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["key2"], "value2");
    }

    #[tokio::test]
    async fn test_load_desired_state_missing_file() {
        let err = load_desired_state(Path::new("/nonexistent/secrets.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::DesiredStateRead { .. }));
    }

    #[tokio::test]
    async fn test_load_desired_state_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = load_desired_state(file.path()).await.unwrap_err();
        assert!(matches!(err, SyncError::DesiredStateParse { .. }));
    }
}

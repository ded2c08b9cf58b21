//! # Validation Tests
//!
//! Configuration problems are reported before the store is touched.

mod common;

use common::{desired_file, sync_config};
use secret_sync::{InMemorySecretStore, Orchestrator, SyncConfig, ValidationError};
use std::path::PathBuf;
use std::sync::Arc;

fn new_orchestrator(config: SyncConfig) -> (Result<Orchestrator, ValidationError>, InMemorySecretStore) {
    let store = InMemorySecretStore::new(common::SECRET_NAME);
    let result = Orchestrator::new(config, Arc::new(store.clone()));
    (result, store)
}

fn assert_missing(mutate: impl FnOnce(&mut SyncConfig), expected: &str) {
    let file = desired_file("{}");
    let mut config = sync_config(&file);
    mutate(&mut config);

    let (result, store) = new_orchestrator(config);
    let err = result.expect_err("validation should fail");
    assert_eq!(err.to_string(), expected);
    assert_eq!(store.calls().total(), 0);
}

#[test]
fn test_each_missing_field_has_its_own_error() {
    assert_missing(
        |c| c.credentials.aws_access_key_id.clear(),
        "Missing aws_access_key_id",
    );
    assert_missing(
        |c| c.credentials.aws_secret_access_key.clear(),
        "Missing aws_secret_access_key",
    );
    assert_missing(|c| c.aws_region.clear(), "Missing aws_region");
    assert_missing(|c| c.secret_name.clear(), "Missing secret_name");
    assert_missing(|c| c.json_file_path = None, "Missing json_file_path");
}

#[test]
fn test_missing_desired_file() {
    let file = desired_file("{}");
    let mut config = sync_config(&file);
    config.json_file_path = Some(PathBuf::from("/nonexistent/secrets.json"));

    let (result, _) = new_orchestrator(config);
    let err = result.expect_err("validation should fail");
    assert!(matches!(err, ValidationError::JsonFileNotFound(_)));
    assert_eq!(
        err.to_string(),
        "JSON file does not exist at path: /nonexistent/secrets.json"
    );
}

#[test]
fn test_invalid_exclude_pattern() {
    let file = desired_file("{}");
    let mut config = sync_config(&file);
    config.exclude = vec!["^_".to_string(), "(unclosed".to_string()];

    let (result, _) = new_orchestrator(config);
    match result {
        Err(ValidationError::InvalidSkipPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
        other => panic!("expected InvalidSkipPattern, got {other:?}"),
    }
}

#[test]
fn test_delete_needs_no_desired_file() {
    let file = desired_file("{}");
    let mut config = sync_config(&file);
    config.json_file_path = None;
    config.delete_secret = true;

    let (result, _) = new_orchestrator(config);
    assert!(result.is_ok());
}

#[test]
fn test_whitespace_counts_as_missing() {
    let file = desired_file("{}");
    let mut config = sync_config(&file);
    config.secret_name = "  \t".to_string();

    let (result, _) = new_orchestrator(config);
    assert!(matches!(result, Err(ValidationError::MissingSecretName)));
}

#[test]
fn test_blank_exclude_patterns_are_dropped() {
    let file = desired_file("{}");
    let mut config = sync_config(&file);
    config.exclude = vec!["^_".to_string(), "  ".to_string(), "_test$".to_string()];

    let (result, _) = new_orchestrator(config);
    let orchestrator = result.unwrap();
    let patterns: Vec<&str> = orchestrator.skip_policy().patterns().collect();
    assert_eq!(patterns, vec!["^_", "_test$"]);
    assert!(orchestrator.skip_policy().matches("_local"));
    assert!(!orchestrator.skip_policy().matches("key1"));
}

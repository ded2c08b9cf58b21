//! # Common Provider Utilities
//!
//! Payload encoding shared by store implementations, plus the metric and
//! logging helpers every provider calls around its operations.

use crate::error::StoreError;
use crate::observability::metrics;
use crate::SecretPayload;
use indexmap::IndexMap;
use serde_json::Value;
use std::time::Instant;

/// Decode a remote secret string into a payload
///
/// String values are taken as-is. Booleans and numbers are kept as their JSON
/// text so secrets edited by hand (`{"debug": true}`) still reconcile. Nested
/// values and nulls are rejected.
pub fn decode_payload(raw: &str) -> Result<SecretPayload, StoreError> {
    let object: IndexMap<String, Value> =
        serde_json::from_str(raw).map_err(|e| StoreError::InvalidPayload(e.to_string()))?;

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => Ok((key, s)),
            Value::Bool(_) | Value::Number(_) => Ok((key, value.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(StoreError::InvalidPayload(
                format!("value of key '{key}' is not a string"),
            )),
        })
        .collect()
}

/// Decode a binary secret value
///
/// Invalid UTF-8 is an error, never replaced, so an update cannot write
/// altered values back.
pub fn decode_binary_payload(raw: &[u8]) -> Result<SecretPayload, StoreError> {
    let text = std::str::from_utf8(raw).map_err(|e| {
        StoreError::InvalidPayload(format!("binary secret is not valid UTF-8: {e}"))
    })?;
    decode_payload(text)
}

/// Encode a payload as the JSON object string written to the store
///
/// Empty payloads are refused here so no store can wipe a secret by accident.
pub fn encode_payload(payload: &SecretPayload) -> Result<String, StoreError> {
    if payload.is_empty() {
        return Err(StoreError::EmptyPayload);
    }
    serde_json::to_string(payload).map_err(|e| StoreError::InvalidPayload(e.to_string()))
}

/// Placeholder payload for a newly created secret
#[must_use]
pub fn placeholder_payload() -> SecretPayload {
    use crate::constants::{CREATE_PLACEHOLDER_KEY, CREATE_PLACEHOLDER_VALUE};

    let mut payload = SecretPayload::new();
    payload.insert(
        CREATE_PLACEHOLDER_KEY.to_string(),
        CREATE_PLACEHOLDER_VALUE.to_string(),
    );
    payload
}

/// Record metrics for a successful store operation
pub fn record_store_metrics(provider: &str, operation: &str, start_time: Instant) {
    metrics::record_store_operation(provider, operation, start_time.elapsed().as_secs_f64());
}

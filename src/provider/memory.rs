//! # In-Memory Secret Store
//!
//! Holds one secret in process memory. Used by tests.
//!
//! Every call is counted so tests can assert which store operations a run
//! performed (for example that the delete path never fetches).

use crate::error::StoreError;
use crate::provider::common::{encode_payload, placeholder_payload};
use crate::provider::SecretStore;
use crate::SecretPayload;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Per-operation call counters
#[derive(Debug, Default)]
pub struct CallCounts {
    get_values: AtomicUsize,
    update: AtomicUsize,
    exists: AtomicUsize,
    create: AtomicUsize,
    delete: AtomicUsize,
}

impl CallCounts {
    #[must_use]
    pub fn get_values(&self) -> usize {
        self.get_values.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn update(&self) -> usize {
        self.update.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn exists(&self) -> usize {
        self.exists.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn create(&self) -> usize {
        self.create.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn delete(&self) -> usize {
        self.delete.load(Ordering::SeqCst)
    }

    /// Sum of all counters
    #[must_use]
    pub fn total(&self) -> usize {
        self.get_values() + self.update() + self.exists() + self.create() + self.delete()
    }
}

/// In-memory store for a single named secret
///
/// `None` means the secret does not exist. Thread-safe using `Arc<RwLock>`;
/// clones share the same secret and counters.
#[derive(Clone, Debug)]
pub struct InMemorySecretStore {
    name: String,
    secret: Arc<RwLock<Option<SecretPayload>>>,
    calls: Arc<CallCounts>,
}

impl InMemorySecretStore {
    /// Store where the secret does not exist yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: Arc::new(RwLock::new(None)),
            calls: Arc::new(CallCounts::default()),
        }
    }

    /// Store holding an existing secret
    #[must_use]
    pub fn with_payload(name: impl Into<String>, payload: SecretPayload) -> Self {
        Self {
            name: name.into(),
            secret: Arc::new(RwLock::new(Some(payload))),
            calls: Arc::new(CallCounts::default()),
        }
    }

    /// Current payload, or `None` if the secret does not exist
    pub async fn snapshot(&self) -> Option<SecretPayload> {
        self.secret.read().await.clone()
    }

    #[must_use]
    pub fn calls(&self) -> &CallCounts {
        &self.calls
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_values(&self) -> Result<SecretPayload, StoreError> {
        self.calls.get_values.fetch_add(1, Ordering::SeqCst);
        self.secret
            .read()
            .await
            .clone()
            .ok_or_else(|| StoreError::NotFound(self.name.clone()))
    }

    async fn update(&self, payload: &SecretPayload) -> Result<(), StoreError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        // Same contract as the remote stores: whole-payload replace, never empty
        encode_payload(payload)?;

        let mut secret = self.secret.write().await;
        match secret.as_mut() {
            Some(current) => {
                current.clone_from(payload);
                debug!("Updated in-memory secret {} ({} keys)", self.name, payload.len());
                Ok(())
            }
            None => Err(StoreError::NotFound(self.name.clone())),
        }
    }

    async fn exists(&self) -> Result<bool, StoreError> {
        self.calls.exists.fetch_add(1, Ordering::SeqCst);
        Ok(self.secret.read().await.is_some())
    }

    async fn create(&self) -> Result<(), StoreError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        let mut secret = self.secret.write().await;
        if secret.is_some() {
            return Err(StoreError::Request {
                operation: "create",
                message: format!("Secret '{}' already exists", self.name),
            });
        }
        *secret = Some(placeholder_payload());
        Ok(())
    }

    async fn delete(&self) -> Result<(), StoreError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.secret
            .write()
            .await
            .take()
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(pairs: &[(&str, &str)]) -> SecretPayload {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_missing_secret() {
        let store = InMemorySecretStore::new("app");
        assert!(!store.exists().await.unwrap());
        assert!(matches!(
            store.get_values().await,
            Err(StoreError::NotFound(name)) if name == "app"
        ));
    }

    #[tokio::test]
    async fn test_create_uses_placeholder() {
        let store = InMemorySecretStore::new("app");
        store.create().await.unwrap();
        assert!(store.exists().await.unwrap());
        assert_eq!(store.get_values().await.unwrap(), placeholder_payload());
    }

    #[tokio::test]
    async fn test_create_twice_fails() {
        let store = InMemorySecretStore::new("app");
        store.create().await.unwrap();
        assert!(store.create().await.is_err());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_payload() {
        let store = InMemorySecretStore::with_payload("app", payload(&[("a", "1"), ("b", "2")]));
        store.update(&payload(&[("c", "3")])).await.unwrap();
        assert_eq!(store.snapshot().await, Some(payload(&[("c", "3")])));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_payload() {
        let store = InMemorySecretStore::with_payload("app", payload(&[("a", "1")]));
        let err = store.update(&SecretPayload::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyPayload));
        assert_eq!(store.snapshot().await, Some(payload(&[("a", "1")])));
    }

    #[tokio::test]
    async fn test_delete_removes_secret() {
        let store = InMemorySecretStore::with_payload("app", payload(&[("a", "1")]));
        store.delete().await.unwrap();
        assert!(store.snapshot().await.is_none());
        assert!(store.delete().await.is_err());
    }

    #[tokio::test]
    async fn test_call_counts_are_shared_between_clones() {
        let store = InMemorySecretStore::with_payload("app", payload(&[("a", "1")]));
        let clone = store.clone();
        clone.get_values().await.unwrap();
        clone.exists().await.unwrap();
        assert_eq!(store.calls().get_values(), 1);
        assert_eq!(store.calls().exists(), 1);
        assert_eq!(store.calls().total(), 2);
    }
}

//! # Provider Modules
//!
//! Secret store adapters.
//!
//! Each store implements [`SecretStore`] for exactly one named secret:
//! - [`aws::AwsSecretsManager`]: AWS Secrets Manager
//! - [`memory::InMemorySecretStore`]: in-process store for tests and dry runs

use crate::error::StoreError;
use crate::SecretPayload;
use async_trait::async_trait;

/// Adapter over the remote service holding one secret
///
/// Authentication, retries and timeouts are the implementation's business;
/// callers see a single attempt per method.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Name of the secret this store operates on
    fn name(&self) -> &str;

    /// Current payload of the secret
    async fn get_values(&self) -> Result<SecretPayload, StoreError>;

    /// Replace the whole payload atomically
    /// Fails with [`StoreError::EmptyPayload`] for an empty payload
    async fn update(&self, payload: &SecretPayload) -> Result<(), StoreError>;

    /// Whether the secret exists
    async fn exists(&self) -> Result<bool, StoreError>;

    /// Create the secret with a fixed, non-empty placeholder payload
    async fn create(&self) -> Result<(), StoreError>;

    /// Delete the secret (subject to the implementation's recovery window)
    async fn delete(&self) -> Result<(), StoreError>;
}

// Common utilities shared across providers
pub mod common;

// Provider implementations
pub mod aws;
pub mod memory;

pub use aws::AwsSecretsManager;
pub use memory::InMemorySecretStore;

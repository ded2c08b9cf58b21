//! # AWS Secrets Manager Client
//!
//! Client for interacting with AWS Secrets Manager API.
//!
//! This module provides functionality to:
//! - Read and replace the JSON payload of one secret
//! - Check existence, create with a placeholder payload, delete with a recovery window
//! - Authenticate with static access keys from the sync configuration

use crate::config::SyncConfig;
use crate::constants::{AWS_PROVIDER, DELETE_RECOVERY_WINDOW_DAYS};
use crate::error::StoreError;
use crate::observability::metrics;
use crate::provider::common::{
    decode_binary_payload, decode_payload, encode_payload, placeholder_payload,
    record_store_metrics,
};
use crate::provider::SecretStore;
use crate::SecretPayload;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::types::{Filter, FilterNameStringType};
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, field, info, info_span, warn, Instrument};

/// Name the static credentials are registered under in the SDK
const CREDENTIALS_PROVIDER_NAME: &str = "secret-sync";

/// AWS Secrets Manager provider implementation
pub struct AwsSecretsManager {
    client: SecretsManagerClient,
    secret_name: String,
    region: String,
}

impl std::fmt::Debug for AwsSecretsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManager")
            .field("secret_name", &self.secret_name)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsSecretsManager {
    /// Create a new AWS Secrets Manager client for the configured secret
    ///
    /// Builds the SDK config from the access keys, region and optional
    /// endpoint override in `config`. No request is sent.
    pub async fn new(config: &SyncConfig) -> Self {
        let credentials = Credentials::new(
            config.credentials.aws_access_key_id.clone(),
            config.credentials.aws_secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = config.endpoint_url.as_deref() {
            info!("Using custom AWS Secrets Manager endpoint: {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }

        let sdk_config = builder.load().await;

        Self::with_client(
            SecretsManagerClient::new(&sdk_config),
            config.secret_name.clone(),
            config.aws_region.clone(),
        )
    }

    /// Wrap an already configured SDK client
    #[must_use]
    pub fn with_client(
        client: SecretsManagerClient,
        secret_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            client,
            secret_name: secret_name.into(),
            region: region.into(),
        }
    }

    /// Run one store operation inside a span, recording duration and outcome
    async fn observe<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
        T: Send,
    {
        let span = info_span!(
            "aws.secret.operation",
            secret.name = %self.secret_name,
            region = %self.region,
            operation.name = operation,
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        );
        let start = Instant::now();

        let result = fut.instrument(span.clone()).await;

        span.record(
            "operation.duration_ms",
            u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        match &result {
            Ok(_) => {
                span.record("operation.success", true);
                record_store_metrics(AWS_PROVIDER, operation, start);
            }
            Err(e) => {
                span.record("operation.success", false);
                span.record("error.message", e.to_string().as_str());
                metrics::increment_store_operation_errors(AWS_PROVIDER, operation);
            }
        }

        result
    }
}

fn request_error<E>(operation: &'static str, err: &E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::Request {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
}

#[async_trait]
impl SecretStore for AwsSecretsManager {
    fn name(&self) -> &str {
        &self.secret_name
    }

    async fn get_values(&self) -> Result<SecretPayload, StoreError> {
        self.observe("get", async {
            let response = self
                .client
                .get_secret_value()
                .secret_id(&self.secret_name)
                .send()
                .await
                .map_err(|e| {
                    if e.as_service_error()
                        .is_some_and(|se| se.is_resource_not_found_exception())
                    {
                        StoreError::NotFound(self.secret_name.clone())
                    } else {
                        request_error("get", &e)
                    }
                })?;

            let payload = match (response.secret_string(), response.secret_binary()) {
                (Some(raw), _) => decode_payload(raw)?,
                (None, Some(blob)) => decode_binary_payload(blob.as_ref())?,
                (None, None) => {
                    return Err(StoreError::InvalidPayload(
                        "Secret has no string or binary value".to_string(),
                    ))
                }
            };

            debug!(
                "Fetched AWS secret {} with {} keys",
                self.secret_name,
                payload.len()
            );
            Ok(payload)
        })
        .await
    }

    async fn update(&self, payload: &SecretPayload) -> Result<(), StoreError> {
        // Encoding refuses empty payloads before anything reaches the network
        let secret_string = encode_payload(payload)?;

        self.observe("update", async {
            info!("Updating AWS secret: {}", self.secret_name);
            self.client
                .update_secret()
                .secret_id(&self.secret_name)
                .secret_string(secret_string)
                .send()
                .await
                .map_err(|e| request_error("update", &e))?;
            Ok(())
        })
        .await
    }

    async fn exists(&self) -> Result<bool, StoreError> {
        self.observe("exists", async {
            let mut next_token: Option<String> = None;

            // The name filter is a prefix match, so look for an exact name across pages
            loop {
                let output = self
                    .client
                    .list_secrets()
                    .filters(
                        Filter::builder()
                            .key(FilterNameStringType::Name)
                            .values(self.secret_name.clone())
                            .build(),
                    )
                    .set_next_token(next_token.take())
                    .send()
                    .await
                    .map_err(|e| request_error("exists", &e))?;

                if output
                    .secret_list()
                    .iter()
                    .any(|entry| entry.name() == Some(self.secret_name.as_str()))
                {
                    return Ok(true);
                }

                match output.next_token() {
                    Some(token) => next_token = Some(token.to_string()),
                    None => return Ok(false),
                }
            }
        })
        .await
    }

    async fn create(&self) -> Result<(), StoreError> {
        let secret_string = encode_payload(&placeholder_payload())?;

        self.observe("create", async {
            info!("Creating AWS secret: {}", self.secret_name);
            self.client
                .create_secret()
                .name(&self.secret_name)
                .secret_string(secret_string)
                .send()
                .await
                .map_err(|e| request_error("create", &e))?;
            Ok(())
        })
        .await
    }

    async fn delete(&self) -> Result<(), StoreError> {
        self.observe("delete", async {
            warn!(
                "Deleting AWS secret: {} (recoverable for {} days)",
                self.secret_name, DELETE_RECOVERY_WINDOW_DAYS
            );
            self.client
                .delete_secret()
                .secret_id(&self.secret_name)
                .recovery_window_in_days(DELETE_RECOVERY_WINDOW_DAYS)
                .send()
                .await
                .map_err(|e| request_error("delete", &e))?;
            Ok(())
        })
        .await
    }
}

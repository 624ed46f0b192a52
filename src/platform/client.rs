use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::errors::PlatformError;
use super::files::FileHandler;
use super::process::ProcessHandler;
use super::records::RecordHandler;
use super::types::{FileToken, ProcessDefinition, RecordSnapshot};
use crate::config::HankoRelayConfig;
use crate::workflow::traits::{ProcessSource, RecordStore, StorageClient};

/// Header carrying the tenant API token on every request.
pub const API_TOKEN_HEADER: &str = "X-Api-Token";

/// Rate-limited HTTP client for the host platform's record, file, and
/// process APIs.
///
/// One client per tenant; handlers share the underlying connection
/// pool and rate limiter, so cloning is cheap and all API traffic is
/// throttled together.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    request_token: Option<String>,
}

impl PlatformClient {
    pub fn new(
        base_url: impl Into<String>,
        api_token: &str,
        request_token: Option<String>,
        requests_per_second: u32,
        burst_capacity: u32,
    ) -> Result<Self, PlatformError> {
        let mut headers = HeaderMap::new();
        let mut token_value = HeaderValue::from_str(api_token)
            .map_err(|_| PlatformError::TokenNotFound("API token contains invalid header characters".to_string()))?;
        token_value.set_sensitive(true);
        headers.insert(API_TOKEN_HEADER, token_value);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        // Burstable direct limiter; platform tenants share one quota
        // across every API family.
        let quota = Quota::per_second(NonZeroU32::new(requests_per_second.max(1)).unwrap())
            .allow_burst(NonZeroU32::new(burst_capacity.max(1)).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter,
            request_token,
        })
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &HankoRelayConfig) -> Result<Self, PlatformError> {
        let token = config.platform.api_token.as_deref().ok_or_else(|| {
            PlatformError::TokenNotFound(
                "set platform.api_token in hanko-relay.toml or export HANKO_RELAY_API_TOKEN".to_string(),
            )
        })?;
        Self::new(
            config.platform.base_url.clone(),
            token,
            config.platform.request_token.clone(),
            config.platform.rate_limit.requests_per_second,
            config.platform.rate_limit.burst_capacity,
        )
    }

    /// Handler for the record query/update APIs.
    pub fn records(&self) -> RecordHandler {
        RecordHandler::new(self.http.clone(), self.base_url.clone(), self.rate_limiter.clone())
    }

    /// Handler for the file download/upload APIs.
    pub fn files(&self) -> FileHandler {
        FileHandler::new(
            self.http.clone(),
            self.base_url.clone(),
            self.rate_limiter.clone(),
            self.request_token.clone(),
        )
    }

    /// Handler for the process-definition API.
    pub fn process(&self) -> ProcessHandler {
        ProcessHandler::new(self.http.clone(), self.base_url.clone(), self.rate_limiter.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Wait for rate limit permission before issuing a request.
pub(crate) async fn throttle(rate_limiter: &DefaultDirectRateLimiter) {
    rate_limiter
        .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
        .await;
    debug!("Executing platform API request with rate limiting");
}

// Capability trait implementations so production wiring can hand one
// client to every component.

#[async_trait]
impl RecordStore for PlatformClient {
    async fn query_records(
        &self,
        app_id: u64,
        query: &str,
    ) -> Result<Vec<RecordSnapshot>, PlatformError> {
        self.records().query_records(app_id, query).await
    }

    async fn update_record_field(
        &self,
        app_id: u64,
        record_id: u64,
        field_code: &str,
        files: &[FileToken],
    ) -> Result<(), PlatformError> {
        self.records()
            .update_record_field(app_id, record_id, field_code, files)
            .await
    }
}

#[async_trait]
impl StorageClient for PlatformClient {
    async fn download(&self, file_key: &str) -> Result<Vec<u8>, PlatformError> {
        self.files().download(file_key).await
    }

    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<FileToken, PlatformError> {
        self.files().upload(file_name, content).await
    }
}

#[async_trait]
impl ProcessSource for PlatformClient {
    async fn fetch_definition(&self, app_id: u64) -> Result<ProcessDefinition, PlatformError> {
        self.process().fetch_definition(app_id).await
    }
}

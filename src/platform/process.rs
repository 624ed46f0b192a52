use governor::DefaultDirectRateLimiter;
use std::sync::Arc;
use tracing::debug;

use super::client::throttle;
use super::errors::PlatformError;
use super::types::ProcessDefinition;
use crate::observability::platform_metrics;

/// Handler for the process-management status API
#[derive(Debug)]
pub struct ProcessHandler {
    http: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl ProcessHandler {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        rate_limiter: Arc<DefaultDirectRateLimiter>,
    ) -> Self {
        Self { http, base_url, rate_limiter }
    }

    /// Fetch the process definition configured for an app.
    pub async fn fetch_definition(&self, app_id: u64) -> Result<ProcessDefinition, PlatformError> {
        throttle(&self.rate_limiter).await;
        platform_metrics().record_request();

        let response = self
            .http
            .get(format!("{}/api/app/status", self.base_url))
            .query(&[("app", app_id.to_string())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::from_response(response).await);
        }

        let definition: ProcessDefinition = response.json().await?;
        debug!(
            app_id,
            enabled = definition.enabled,
            transitions = definition.transitions.len(),
            "process definition fetched"
        );
        Ok(definition)
    }
}

use governor::DefaultDirectRateLimiter;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use super::client::throttle;
use super::errors::PlatformError;
use super::types::{FileToken, RecordSnapshot};
use crate::observability::platform_metrics;

/// Handler for record query and partial-update operations
#[derive(Debug)]
pub struct RecordHandler {
    http: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    records: Vec<RecordSnapshot>,
}

impl RecordHandler {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        rate_limiter: Arc<DefaultDirectRateLimiter>,
    ) -> Self {
        Self { http, base_url, rate_limiter }
    }

    /// Fetch records from an app by filter expression.
    pub async fn query_records(
        &self,
        app_id: u64,
        query: &str,
    ) -> Result<Vec<RecordSnapshot>, PlatformError> {
        throttle(&self.rate_limiter).await;
        platform_metrics().record_request();

        let response = self
            .http
            .get(format!("{}/api/records", self.base_url))
            .query(&[("app", app_id.to_string().as_str()), ("query", query)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::from_response(response).await);
        }

        let body: QueryResponse = response.json().await?;
        debug!(app_id, matches = body.records.len(), "record query completed");
        Ok(body.records)
    }

    /// Partially update one record, replacing a single field's value
    /// with the given file references.
    pub async fn update_record_field(
        &self,
        app_id: u64,
        record_id: u64,
        field_code: &str,
        files: &[FileToken],
    ) -> Result<(), PlatformError> {
        throttle(&self.rate_limiter).await;
        platform_metrics().record_request();

        let value: Vec<_> = files
            .iter()
            .map(|token| json!({ "fileKey": token.file_key }))
            .collect();
        let payload = json!({
            "app": app_id,
            "id": record_id,
            "record": {
                field_code: { "value": value }
            }
        });

        let response = self
            .http
            .put(format!("{}/api/record", self.base_url))
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::from_response(response).await);
        }

        debug!(app_id, record_id, field_code, "record field updated");
        Ok(())
    }
}

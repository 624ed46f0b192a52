use governor::DefaultDirectRateLimiter;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::client::throttle;
use super::errors::PlatformError;
use super::types::FileToken;
use crate::observability::platform_metrics;

/// Multipart part name for the upload anti-forgery token.
const REQUEST_TOKEN_PART: &str = "requestToken";

/// Handler for file storage operations
#[derive(Debug)]
pub struct FileHandler {
    http: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    request_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "fileKey")]
    file_key: String,
}

impl FileHandler {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        rate_limiter: Arc<DefaultDirectRateLimiter>,
        request_token: Option<String>,
    ) -> Self {
        Self { http, base_url, rate_limiter, request_token }
    }

    /// Fetch the byte content addressed by a storage key.
    pub async fn download(&self, file_key: &str) -> Result<Vec<u8>, PlatformError> {
        throttle(&self.rate_limiter).await;
        platform_metrics().record_request();

        let response = self
            .http
            .get(format!("{}/api/file", self.base_url))
            .query(&[("fileKey", file_key)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::from_response(response).await);
        }

        let bytes = response.bytes().await?;
        platform_metrics().record_download(bytes.len());
        debug!(file_key, size = bytes.len(), "file downloaded");
        Ok(bytes.to_vec())
    }

    /// Submit bytes plus filename to the current app's storage,
    /// minting a new file token.
    pub async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<FileToken, PlatformError> {
        throttle(&self.rate_limiter).await;
        platform_metrics().record_request();

        let size = content.len();
        let mut form = Form::new().part("file", Part::bytes(content).file_name(file_name.to_string()));
        if let Some(token) = &self.request_token {
            form = form.text(REQUEST_TOKEN_PART, token.clone());
        }

        let response = self
            .http
            .post(format!("{}/api/file", self.base_url))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(PlatformError::from_response(response).await);
        }

        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body)?;
        platform_metrics().record_upload(size);
        debug!(file_name, file_key = %parsed.file_key, size, "file uploaded");

        Ok(FileToken {
            file_key: parsed.file_key,
            file_name: file_name.to_string(),
        })
    }
}

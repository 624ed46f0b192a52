use thiserror::Error;

use crate::observability::platform_metrics;

/// Transport-level failures talking to the host platform's APIs.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error talking to the platform: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected platform response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("platform API token not configured: {0}")]
    TokenNotFound(String),
}

impl PlatformError {
    /// Build an `Api` error from a non-success response, consuming the
    /// body as the error message.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        platform_metrics().record_error();
        PlatformError::Api { status, message }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlatformError::Api { status: 404, .. })
    }
}

//! Remote model request/response types and error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when communicating with the remote model.
///
/// `RateLimited` is kept distinct from every other failure so the retrier
/// can apply its extended cooldown instead of linear backoff.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The remote service signalled too many requests.
    #[error("Rate limited by the model service")]
    RateLimited { retry_after: Option<u64> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing credential; fatal and never retried.
    #[error("API key not configured")]
    MissingApiKey,
}

impl BackendError {
    /// Whether the retrier may attempt this operation again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, BackendError::MissingApiKey)
    }
}

/// Request body for one chunk submitted to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRequest {
    pub text: String,
}

/// Success body from the model: inline audio as base64-encoded raw PCM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    pub audio: String,
}

/// Error body the model returns alongside a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelErrorBody {
    pub error: String,
}

//! HTTP client for the remote TTS model.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::TtsBackend;
use super::types::{BackendError, ModelErrorBody, ModelRequest, ModelResponse};

/// HTTP-based model client.
///
/// Submits one chunk of text per request and decodes the inline base64
/// audio payload to raw PCM bytes.
pub struct HttpBackend {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a client with an explicit API key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Create a client reading the API key from the `TTS_API_KEY`
    /// environment variable. A missing key fails here, before any chunk
    /// is dispatched.
    pub fn from_env(endpoint: impl Into<String>) -> Result<Self, BackendError> {
        let api_key = std::env::var("TTS_API_KEY").map_err(|_| BackendError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(BackendError::MissingApiKey);
        }
        Ok(Self::new(endpoint, api_key))
    }

    /// Get the endpoint URL this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TtsBackend for HttpBackend {
    fn synthesize(&self, text: &str) -> Result<Vec<u8>, BackendError> {
        let request = ModelRequest {
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(BackendError::RateLimited { retry_after });
        }

        if !status.is_success() {
            // Surface the model's own message when it sends one
            let message = response
                .json::<ModelErrorBody>()
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("Status: {status}"));
            return Err(BackendError::RequestFailed(message));
        }

        let body: ModelResponse = response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        STANDARD
            .decode(&body.audio)
            .map_err(|e| BackendError::InvalidResponse(format!("Bad base64 audio: {e}")))
    }
}

//! Outbound communication with the remote TTS model.
//!
//! The model accepts only bounded-size text and answers with inline
//! base64-encoded raw PCM, or an error. Rate-limit responses are surfaced
//! as their own error variant so the retrier can treat them specially.

mod client;
mod types;

pub use client::HttpBackend;
pub use types::{BackendError, ModelErrorBody, ModelRequest, ModelResponse};

/// Trait for remote model communication.
///
/// Abstracts the HTTP call so the pipeline can run against a mock in tests.
#[cfg_attr(test, mockall::automock)]
pub trait TtsBackend: Send + Sync {
    /// Submit one chunk of text, returning raw PCM bytes for it.
    fn synthesize(&self, text: &str) -> Result<Vec<u8>, BackendError>;
}

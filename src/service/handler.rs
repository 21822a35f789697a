//! Inbound generation service.
//!
//! Transport framing (sockets, headers, TLS) belongs to whatever embeds
//! this crate; the handler here covers everything behind it: the method
//! check, input validation, per-caller rate limiting, caching, pipeline
//! dispatch, and the mapping of every outcome to an HTTP-style status and
//! JSON body.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{BackendError, TtsBackend};
use crate::config::PipelineConfig;
use crate::pipeline::{CancelToken, NullObserver, Pipeline, PipelineError, ProgressObserver};

use super::cache::AudioCache;
use super::limiter::RateLimiter;

/// Inbound call, already stripped of transport framing.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    /// HTTP method of the call; only POST is accepted.
    pub method: String,
    /// Raw JSON body.
    pub body: String,
    /// Caller identity used for rate limiting (e.g. client address).
    pub identity: String,
}

#[derive(Debug, Deserialize)]
struct GenerateBody {
    text: Option<String>,
}

/// Successful generation payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Base64 of the combined raw PCM.
    pub audio: String,
    /// True when served from the cache without touching the model.
    pub cached: bool,
}

/// Error payload returned with every non-200 status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Service-level failure taxonomy.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,

    /// Bad input; reported immediately, nothing is retried.
    #[error("{0}")]
    Validation(String),

    /// Missing credential or broken setup; fatal, never retried.
    #[error("API key not configured on server.")]
    Configuration,

    /// This caller exceeded its window; retry after the hint elapses.
    #[error("Too many requests. Try again in {retry_after}s.")]
    RateLimited { retry_after: u64 },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("No audio was produced for the input")]
    EmptyResult,
}

impl ServiceError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::MethodNotAllowed => 405,
            ServiceError::Validation(_) => 400,
            ServiceError::RateLimited { .. } => 429,
            ServiceError::Configuration
            | ServiceError::Generation(_)
            | ServiceError::EmptyResult => 500,
        }
    }
}

/// Status code plus serialized JSON body.
#[derive(Debug)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
}

fn json_body<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Generation service owning the cache and rate-limit state.
///
/// One instance serves many concurrent callers; the pipeline itself is
/// sequential per request, but independent requests only contend on the
/// internally synchronized cache and limiter maps.
pub struct SpeechService<B: TtsBackend> {
    pipeline: Pipeline<B>,
    cache: AudioCache,
    limiter: RateLimiter,
    config: PipelineConfig,
}

impl<B: TtsBackend> SpeechService<B> {
    pub fn new(backend: B, config: PipelineConfig) -> Self {
        Self {
            pipeline: Pipeline::new(backend, config.clone()),
            cache: AudioCache::new(config.cache_ttl),
            limiter: RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window),
            config,
        }
    }

    /// Handle one inbound call, mapping every outcome to a status and body.
    pub fn handle(&self, request: &ServiceRequest) -> ServiceResponse {
        match self.dispatch(request) {
            Ok(payload) => ServiceResponse {
                status: 200,
                body: json_body(&payload),
            },
            Err(err) => {
                let retry_after = match &err {
                    ServiceError::RateLimited { retry_after } => Some(*retry_after),
                    _ => None,
                };
                ServiceResponse {
                    status: err.status(),
                    body: json_body(&ErrorBody {
                        error: err.to_string(),
                        retry_after,
                    }),
                }
            }
        }
    }

    fn dispatch(&self, request: &ServiceRequest) -> Result<GenerateResponse, ServiceError> {
        if !request.method.eq_ignore_ascii_case("POST") {
            return Err(ServiceError::MethodNotAllowed);
        }

        let body: GenerateBody = serde_json::from_str(&request.body).map_err(|_| {
            ServiceError::Validation("Text is required and must be a string.".to_string())
        })?;
        let text = body.text.unwrap_or_default();

        self.generate(&text, &request.identity, &NullObserver, &CancelToken::new())
    }

    /// Run validation, rate limiting, cache lookup, and the pipeline for
    /// `text` on behalf of `identity`.
    ///
    /// The cache is consulted before the pipeline runs and written only
    /// after assembly succeeds; partial audio never leaves this method.
    pub fn generate(
        &self,
        text: &str,
        identity: &str,
        observer: &dyn ProgressObserver,
        cancel: &CancelToken,
    ) -> Result<GenerateResponse, ServiceError> {
        self.validate_text(text)?;

        if let Err(retry_after) = self.limiter.check(identity) {
            return Err(ServiceError::RateLimited { retry_after });
        }

        if self.config.enable_caching
            && let Some(audio) = self.cache.get(text)
        {
            info!("cache hit for {}-char text", text.chars().count());
            return Ok(GenerateResponse {
                audio,
                cached: true,
            });
        }

        let pcm = self
            .pipeline
            .run_observed(text, observer, cancel)
            .map_err(|err| match err {
                PipelineError::NoAudio => ServiceError::EmptyResult,
                PipelineError::ChunkFailed { ref source, .. }
                    if matches!(source.source, BackendError::MissingApiKey) =>
                {
                    ServiceError::Configuration
                }
                other => ServiceError::Generation(other.to_string()),
            })?;

        let audio = STANDARD.encode(&pcm);
        if self.config.enable_caching {
            self.cache.store(text, audio.clone());
        }
        Ok(GenerateResponse {
            audio,
            cached: false,
        })
    }

    fn validate_text(&self, text: &str) -> Result<(), ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Text is required and must be a string.".to_string(),
            ));
        }
        let len = text.chars().count();
        if len > self.config.max_text_length {
            return Err(ServiceError::Validation(format!(
                "Text is too long: {len} characters (limit {}).",
                self.config.max_text_length
            )));
        }
        Ok(())
    }
}

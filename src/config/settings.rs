//! Pipeline configuration values and validation.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("max_chunk_size must be greater than zero")]
    ZeroChunkSize,

    #[error("max_retries must be greater than zero")]
    ZeroRetries,

    #[error("max_text_length must be greater than zero")]
    ZeroTextLength,

    #[error("rate_limit_window must be greater than zero when rate limiting is enabled")]
    ZeroRateLimitWindow,

    #[error("cache_ttl must be greater than zero when caching is enabled")]
    ZeroCacheTtl,

    #[error("channels must be 1 or 2, got {0}")]
    BadChannels(u16),
}

/// Tunable parameters for the whole generation pipeline.
///
/// Defaults match the remote model's constraints: 800-character chunks,
/// one second between requests, three attempts per chunk, a one-hour cache,
/// and ten requests per caller per minute.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum characters per chunk submitted to the model.
    pub max_chunk_size: usize,
    /// Delay inserted before every chunk request after the first.
    pub request_delay: Duration,
    /// Attempts allowed per chunk before the whole run aborts.
    pub max_retries: u32,
    /// Base delay for linear backoff after a generic failure.
    pub retry_base_delay: Duration,
    /// Fixed cooldown after the model signals too many requests.
    /// Deliberately distinct from the linear backoff above.
    pub rate_limit_cooldown: Duration,
    /// Whether successful generations are memoized by exact source text.
    pub enable_caching: bool,
    /// Age past which a cached entry is no longer served.
    pub cache_ttl: Duration,
    /// Admitted requests per caller identity per window; 0 disables limiting.
    pub rate_limit_max_requests: u32,
    /// Length of the per-caller rate-limit window.
    pub rate_limit_window: Duration,
    /// Input validation ceiling, in characters.
    pub max_text_length: usize,
    /// Sample rate of the PCM the model returns, in Hz.
    pub sample_rate: u32,
    /// Channel count of the PCM the model returns.
    pub channels: u16,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 800,
            request_delay: Duration::from_millis(1000),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(1000),
            rate_limit_cooldown: Duration::from_secs(10),
            enable_caching: true,
            cache_ttl: Duration::from_millis(3_600_000),
            rate_limit_max_requests: 10,
            rate_limit_window: Duration::from_millis(60_000),
            max_text_length: 100_000,
            sample_rate: 24_000,
            channels: 1,
        }
    }
}

impl PipelineConfig {
    /// Reject configurations that would wedge or loop the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.max_retries == 0 {
            return Err(ConfigError::ZeroRetries);
        }
        if self.max_text_length == 0 {
            return Err(ConfigError::ZeroTextLength);
        }
        if self.rate_limit_max_requests > 0 && self.rate_limit_window.is_zero() {
            return Err(ConfigError::ZeroRateLimitWindow);
        }
        if self.enable_caching && self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroCacheTtl);
        }
        if self.channels == 0 || self.channels > 2 {
            return Err(ConfigError::BadChannels(self.channels));
        }
        Ok(())
    }
}

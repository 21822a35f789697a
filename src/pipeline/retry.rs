//! Per-chunk retry with backoff.

use std::thread;
use std::time::Duration;

use log::warn;
use thiserror::Error;

use crate::backend::BackendError;

/// Backoff parameters for one chunk's retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts allowed before the chunk fails permanently.
    pub max_retries: u32,
    /// Base delay for linear backoff after a generic failure.
    pub base_delay: Duration,
    /// Fixed cooldown after the model signals too many requests.
    pub rate_limit_cooldown: Duration,
}

/// Permanent failure of one chunk after retries were exhausted.
#[derive(Error, Debug)]
#[error("failed after {attempts} attempt(s): {source}")]
pub struct RetryError {
    /// Attempts consumed, including the final failing one.
    pub attempts: u32,
    #[source]
    pub source: BackendError,
}

/// Retry state for a single chunk.
#[derive(Debug)]
enum ChunkState {
    Pending,
    Attempting { attempt: u32 },
    BackoffWaiting { attempt: u32, delay: Duration },
    Success { bytes: Vec<u8>, attempts: u32 },
    PermanentFailure(RetryError),
}

impl RetryPolicy {
    /// Drive `operation` to success or permanent failure, returning the
    /// produced bytes and the attempts consumed.
    ///
    /// Rate-limited failures wait the fixed cooldown; every other failure
    /// waits `base_delay * attempt` before the next try. Non-retryable
    /// errors (missing credential) fail immediately. Each retry re-invokes
    /// the full operation.
    pub fn run<F>(&self, mut operation: F) -> Result<(Vec<u8>, u32), RetryError>
    where
        F: FnMut() -> Result<Vec<u8>, BackendError>,
    {
        let mut state = ChunkState::Pending;
        loop {
            state = match state {
                ChunkState::Pending => ChunkState::Attempting { attempt: 1 },

                ChunkState::Attempting { attempt } => match operation() {
                    Ok(bytes) => ChunkState::Success {
                        bytes,
                        attempts: attempt,
                    },
                    Err(source) if !source.is_retryable() || attempt >= self.max_retries => {
                        ChunkState::PermanentFailure(RetryError {
                            attempts: attempt,
                            source,
                        })
                    }
                    Err(source) => {
                        let delay = self.backoff_delay(&source, attempt);
                        warn!(
                            "attempt {attempt}/{} failed ({source}), waiting {}ms",
                            self.max_retries,
                            delay.as_millis()
                        );
                        ChunkState::BackoffWaiting { attempt, delay }
                    }
                },

                ChunkState::BackoffWaiting { attempt, delay } => {
                    thread::sleep(delay);
                    ChunkState::Attempting {
                        attempt: attempt + 1,
                    }
                }

                ChunkState::Success { bytes, attempts } => return Ok((bytes, attempts)),
                ChunkState::PermanentFailure(err) => return Err(err),
            };
        }
    }

    fn backoff_delay(&self, err: &BackendError, attempt: u32) -> Duration {
        match err {
            BackendError::RateLimited { .. } => self.rate_limit_cooldown,
            _ => self.base_delay * attempt,
        }
    }
}

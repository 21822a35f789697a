//! Sequential chunk-by-chunk pipeline driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use log::{debug, info};
use thiserror::Error;

use crate::backend::TtsBackend;
use crate::chunker;
use crate::config::PipelineConfig;

use super::assemble::assemble;
use super::retry::{RetryError, RetryPolicy};

/// Raw PCM produced for one chunk.
#[derive(Debug, Clone)]
pub struct ChunkResult {
    /// Index of the chunk this audio belongs to.
    pub index: usize,
    /// Headerless PCM bytes returned by the model.
    pub bytes: Vec<u8>,
    /// Attempts consumed, including the successful one.
    pub attempts: u32,
}

/// Errors that abort a pipeline run.
///
/// The pipeline is all-or-nothing: partial audio is never returned.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Chunk {index} {source}")]
    ChunkFailed {
        index: usize,
        #[source]
        source: RetryError,
    },

    #[error("No audio was produced for the input")]
    NoAudio,

    #[error("Generation was cancelled")]
    Cancelled,
}

/// Observer for advisory progress events.
///
/// `completed` is monotonically non-decreasing and reported at most once per
/// chunk boundary (plus one initial event after chunking). Observations never
/// affect control flow.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, completed: usize, total: usize);
}

/// Observer that discards all events.
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Cooperative cancellation flag checked between chunks.
///
/// The chunk in flight when the signal arrives is awaited to completion or
/// failure; no further chunk is started after the signal is observed.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives text through chunking, per-chunk synthesis with retry, and
/// in-order reassembly.
///
/// Chunks are processed strictly sequentially, one at a time. This
/// serializes load against the remote model so its rate limits are
/// respected and ordering needs no merge step.
pub struct Pipeline<B: TtsBackend> {
    backend: B,
    config: PipelineConfig,
}

impl<B: TtsBackend> Pipeline<B> {
    pub fn new(backend: B, config: PipelineConfig) -> Self {
        Self { backend, config }
    }

    /// Generate combined PCM for `text`.
    pub fn run(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        self.run_observed(text, &NullObserver, &CancelToken::new())
    }

    /// Generate combined PCM, reporting progress and honoring cancellation.
    pub fn run_observed(
        &self,
        text: &str,
        observer: &dyn ProgressObserver,
        cancel: &CancelToken,
    ) -> Result<Vec<u8>, PipelineError> {
        let chunks = chunker::split(text, self.config.max_chunk_size);
        if chunks.is_empty() {
            return Err(PipelineError::NoAudio);
        }

        let total = chunks.len();
        info!("generating audio for {total} chunk(s)");
        observer.on_progress(0, total);

        let policy = RetryPolicy {
            max_retries: self.config.max_retries,
            base_delay: self.config.retry_base_delay,
            rate_limit_cooldown: self.config.rate_limit_cooldown,
        };

        let mut results: Vec<ChunkResult> = Vec::with_capacity(total);
        for chunk in &chunks {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            if chunk.index > 0 {
                // Pre-emptive spacing between requests keeps the remote
                // limiter from tripping in the first place.
                thread::sleep(self.config.request_delay);
            }

            let (bytes, attempts) = policy
                .run(|| self.backend.synthesize(&chunk.content))
                .map_err(|source| PipelineError::ChunkFailed {
                    index: chunk.index,
                    source,
                })?;

            debug!(
                "chunk {}/{total}: {} bytes in {attempts} attempt(s)",
                chunk.index + 1,
                bytes.len()
            );
            results.push(ChunkResult {
                index: chunk.index,
                bytes,
                attempts,
            });
            observer.on_progress(chunk.index + 1, total);
        }

        let combined = assemble(&results);
        if combined.is_empty() {
            return Err(PipelineError::NoAudio);
        }
        Ok(combined)
    }
}

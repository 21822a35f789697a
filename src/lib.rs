//! longform-tts-rs: long-form text to speech.
//!
//! This crate turns arbitrarily long text into a single WAV artifact by
//! splitting it into model-safe chunks, driving sequential rate-limited
//! requests against a remote TTS model with retry and backoff, reassembling
//! the returned PCM segments in order, and wrapping the result in a WAV
//! container.

pub mod audio;
pub mod backend;
pub mod chunker;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod service;

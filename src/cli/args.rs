//! CLI argument definitions and parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::PipelineConfig;

/// Long-form text-to-speech CLI.
#[derive(Parser, Debug)]
#[command(name = "longform-tts-rs")]
#[command(about = "Turns long-form text into a single WAV via a remote TTS model")]
#[command(version)]
pub struct Args {
    /// Text file to read; use --text for inline input
    #[arg(short, long, conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Inline text to generate speech from
    #[arg(short, long)]
    pub text: Option<String>,

    /// Output WAV file
    #[arg(short, long, default_value = "output.wav")]
    pub output: PathBuf,

    /// Remote model endpoint URL
    #[arg(long, default_value = "http://localhost:8787/v1/speech")]
    pub endpoint: String,

    /// Maximum characters per chunk
    #[arg(long, default_value_t = 800)]
    pub max_chunk_size: usize,

    /// Delay between chunk requests, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub request_delay_ms: u64,

    /// Retry attempts per chunk before the run aborts
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Ceiling on input length, in characters
    #[arg(long, default_value_t = 100_000)]
    pub max_text_length: usize,

    /// Disable in-process result caching
    #[arg(long)]
    pub no_cache: bool,

    /// WAV sample rate in Hz
    #[arg(long, default_value_t = 24_000)]
    pub sample_rate: u32,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build a pipeline configuration from the parsed flags.
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            max_chunk_size: self.max_chunk_size,
            request_delay: Duration::from_millis(self.request_delay_ms),
            max_retries: self.max_retries,
            max_text_length: self.max_text_length,
            enable_caching: !self.no_cache,
            sample_rate: self.sample_rate,
            ..PipelineConfig::default()
        }
    }
}

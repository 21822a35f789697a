//! longform-tts-rs CLI entry point.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use clap::Parser;
use log::LevelFilter;

use longform_tts_rs::audio::{self, AudioFormat};
use longform_tts_rs::backend::HttpBackend;
use longform_tts_rs::cli::Args;
use longform_tts_rs::pipeline::{CancelToken, ProgressObserver};
use longform_tts_rs::service::SpeechService;

/// Surfaces pipeline progress on the console as chunks complete.
struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        if completed > 0 {
            println!("  Chunk {completed}/{total} done");
        } else {
            println!("  Split into {total} chunk(s)");
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let text = read_input(&args)?;

    let config = args.to_config();
    config.validate().context("Invalid configuration")?;

    let backend = HttpBackend::from_env(&args.endpoint)
        .context("TTS_API_KEY must be set in the environment")?;
    let service = SpeechService::new(backend, config.clone());

    println!("Generating speech for {} characters...", text.chars().count());

    let response = service
        .generate(&text, "cli", &ConsoleProgress, &CancelToken::new())
        .map_err(|err| anyhow::anyhow!("{err}"))?;
    if response.cached {
        println!("  Served from cache");
    }

    let pcm = STANDARD
        .decode(&response.audio)
        .context("Service returned an invalid audio payload")?;

    let format = AudioFormat {
        sample_rate: config.sample_rate,
        channels: config.channels,
        bits_per_sample: 16,
    };
    let wav = audio::encode(&pcm, &format);

    fs::write(&args.output, &wav)
        .with_context(|| format!("Failed to write audio to: {}", args.output.display()))?;

    println!("Audio saved to: {}", args.output.display());
    println!("  Size: {} bytes", wav.len());
    report_duration(&args.output);

    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }
    bail!("No input specified. Use --input FILE or --text \"...\".")
}

/// Re-read the written artifact to confirm it parses as WAV and report
/// its playable duration.
fn report_duration(path: &Path) {
    match hound::WavReader::open(path) {
        Ok(reader) => {
            let spec = reader.spec();
            let secs = f64::from(reader.duration()) / f64::from(spec.sample_rate);
            println!(
                "  Duration: {secs:.2}s ({} Hz, {} channel(s))",
                spec.sample_rate, spec.channels
            );
        }
        Err(err) => eprintln!("Warning: could not re-read WAV artifact: {err}"),
    }
}

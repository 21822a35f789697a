//! Configuration surface for the generation pipeline.

mod settings;

pub use settings::{ConfigError, PipelineConfig};

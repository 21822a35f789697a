//! The chunked generation pipeline: retrier, sequential driver, assembler.

mod assemble;
mod driver;
mod retry;

pub use assemble::assemble;
pub use driver::{
    CancelToken, ChunkResult, NullObserver, Pipeline, PipelineError, ProgressObserver,
};
pub use retry::{RetryError, RetryPolicy};

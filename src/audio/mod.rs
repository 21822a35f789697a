//! Audio container handling.

mod wav;

pub use wav::{AudioFormat, WAV_HEADER_LEN, encode};

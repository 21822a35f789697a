//! WAV container encoding for raw PCM.
//!
//! The remote model returns headerless little-endian PCM; players need the
//! standard 44-byte RIFF/WAVE header in front of it. Header layout is fixed:
//! `RIFF` + chunk size, `WAVE`, a 16-byte `fmt ` subchunk (PCM format code 1),
//! then the `data` subchunk with the exact payload length.

/// PCM format parameters written into the WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for AudioFormat {
    /// The remote model's output format: 24 kHz mono 16-bit PCM.
    fn default() -> Self {
        Self {
            sample_rate: 24_000,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

/// Size of the header emitted by [`encode`], in bytes.
pub const WAV_HEADER_LEN: usize = 44;

/// Wraps raw PCM bytes in a standard RIFF/WAVE container.
///
/// All multi-byte header fields are little-endian. The payload is appended
/// unmodified, so the result is exactly `WAV_HEADER_LEN + pcm.len()` bytes.
pub fn encode(pcm: &[u8], format: &AudioFormat) -> Vec<u8> {
    let bytes_per_sample = u32::from(format.bits_per_sample / 8);
    let byte_rate = format.sample_rate * u32::from(format.channels) * bytes_per_sample;
    let block_align = format.channels * (format.bits_per_sample / 8);
    let data_len = pcm.len() as u32;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM format code
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    out
}

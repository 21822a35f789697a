//! Ordered concatenation of per-chunk PCM segments.

use super::driver::ChunkResult;

/// Concatenates segments into one buffer, preserving chunk order.
///
/// The buffer is allocated to the exact sum of the segment lengths and each
/// segment lands at its cumulative offset. No reordering or interleaving is
/// ever permitted; this is called only after every chunk has succeeded.
pub fn assemble(results: &[ChunkResult]) -> Vec<u8> {
    let total: usize = results.iter().map(|r| r.bytes.len()).sum();
    let mut combined = Vec::with_capacity(total);
    for result in results {
        combined.extend_from_slice(&result.bytes);
    }
    combined
}

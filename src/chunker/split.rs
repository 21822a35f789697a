//! Boundary-aware text segmentation.
//!
//! Splitting prefers sentence-terminal boundaries, falls back to whitespace
//! boundaries for oversized sentences, and hard-cuts a single oversized word
//! as a last resort. Lengths are measured in characters and hard cuts land
//! on `char` boundaries, so chunks are always valid UTF-8.

/// A bounded slice of input text submitted as one model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// 0-based position in the original text.
    pub index: usize,
    /// Trimmed chunk content, never empty.
    pub content: String,
    /// True for the last chunk of the sequence.
    pub is_final: bool,
}

/// Splits `text` into ordered chunks of at most `max_chunk_size` characters.
///
/// Whitespace-only input (or a zero bound) yields no chunks. Emitted chunks
/// are trimmed, non-empty, and carry contiguous indices in original order.
pub fn split(text: &str, max_chunk_size: usize) -> Vec<TextChunk> {
    let trimmed = text.trim();
    if trimmed.is_empty() || max_chunk_size == 0 {
        return Vec::new();
    }

    let mut contents: Vec<String> = Vec::new();

    if char_len(trimmed) <= max_chunk_size {
        contents.push(trimmed.to_string());
    } else {
        let mut current = String::new();
        for part in sentence_parts(text) {
            if char_len(&current) + char_len(part) > max_chunk_size {
                push_trimmed(&mut contents, &current);
                current.clear();
                if char_len(part) > max_chunk_size {
                    current = split_oversized_segment(part, max_chunk_size, &mut contents);
                } else {
                    current.push_str(part);
                }
            } else {
                current.push_str(part);
            }
        }
        push_trimmed(&mut contents, &current);
    }

    let last = contents.len().saturating_sub(1);
    contents
        .into_iter()
        .enumerate()
        .map(|(index, content)| TextChunk {
            index,
            content,
            is_final: index == last,
        })
        .collect()
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!' | ':' | '\n')
}

/// Splits on runs of sentence terminators, keeping each run attached to the
/// text that precedes it.
fn sentence_parts(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_run = false;

    for (i, c) in text.char_indices() {
        if is_terminal(c) {
            in_run = true;
        } else if in_run {
            parts.push(&text[start..i]);
            start = i;
            in_run = false;
        }
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}

/// Word-level fallback for a sentence segment longer than the chunk bound.
///
/// Completed chunks are pushed to `out`; the trailing partial chunk is
/// returned so the caller can keep packing segments into it.
fn split_oversized_segment(segment: &str, max: usize, out: &mut Vec<String>) -> String {
    let mut sub = String::new();
    for word in whitespace_parts(segment) {
        if char_len(&sub) + char_len(word) > max {
            push_trimmed(out, &sub);
            sub.clear();
            if char_len(word) > max {
                hard_cut(word, max, out);
            } else {
                sub.push_str(word);
            }
        } else {
            sub.push_str(word);
        }
    }
    sub
}

/// Splits on runs of whitespace, keeping each run attached to the word that
/// precedes it.
fn whitespace_parts(segment: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_space = false;

    for (i, c) in segment.char_indices() {
        if c.is_whitespace() {
            in_space = true;
        } else if in_space {
            parts.push(&segment[start..i]);
            start = i;
            in_space = false;
        }
    }
    if start < segment.len() {
        parts.push(&segment[start..]);
    }
    parts
}

/// Last-resort fixed-size cut for a single word longer than the chunk bound.
/// Not semantically aware; the boundary can land mid-syllable.
fn hard_cut(word: &str, max: usize, out: &mut Vec<String>) {
    let chars: Vec<char> = word.chars().collect();
    for piece in chars.chunks(max) {
        let piece: String = piece.iter().collect();
        push_trimmed(out, &piece);
    }
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

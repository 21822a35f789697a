//! Splitting oversized input text into model-safe chunks.

mod split;

pub use split::{TextChunk, split};

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(chunks: &[TextChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.content.as_str()).collect()
    }

    // ===========================================
    // Single-chunk and empty-input cases
    // ===========================================

    #[test]
    fn test_short_text_returns_single_trimmed_chunk() {
        let chunks = split("  Hello world.  ", 100);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].content, "Hello world.");
        assert!(chunks[0].is_final);
    }

    #[test]
    fn test_text_exactly_at_limit_is_one_chunk() {
        let text = "a".repeat(50);
        let chunks = split(&text, 50);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(split("", 100).is_empty());
        assert!(split("   \n\t  ", 100).is_empty());
    }

    #[test]
    fn test_zero_bound_yields_no_chunks() {
        assert!(split("some text", 0).is_empty());
    }

    // ===========================================
    // Sentence-boundary splitting
    // ===========================================

    #[test]
    fn test_splits_on_sentence_boundaries() {
        let text = "First sentence. Second sentence. Third sentence.";
        let chunks = split(text, 20);

        assert!(chunks.len() > 1);
        // Each sentence survives intact with its terminator
        assert!(chunks.iter().any(|c| c.content == "First sentence."));
        assert!(chunks.iter().any(|c| c.content == "Second sentence."));
        assert!(chunks.iter().any(|c| c.content == "Third sentence."));
    }

    #[test]
    fn test_packs_sentences_greedily() {
        let text = "One. Two. Three. Four.";
        let chunks = split(text, 13);

        // "One. Two." fits; " Three. Four." packs into the next chunk
        assert_eq!(contents(&chunks), vec!["One. Two.", "Three. Four."]);
    }

    #[test]
    fn test_terminator_runs_stay_with_preceding_text() {
        let text = "Really?! Yes... Sure:\nOkay then, moving right along now";
        let chunks = split(text, 25);

        for chunk in &chunks {
            // No chunk starts with a dangling terminator from the previous one
            assert!(!chunk.content.starts_with(['.', '?', '!', ':']));
        }
        assert!(chunks.iter().any(|c| c.content.contains("Really?!")));
    }

    #[test]
    fn test_newline_is_a_sentence_boundary() {
        let text = "line one is here\nline two is here\nline three is here";
        let chunks = split(text, 20);

        assert_eq!(
            contents(&chunks),
            vec!["line one is here", "line two is here", "line three is here"]
        );
    }

    // ===========================================
    // Word-boundary and hard-cut fallbacks
    // ===========================================

    #[test]
    fn test_oversized_sentence_falls_back_to_words() {
        // No punctuation at all, 2500 characters of five-char words
        let text = "word ".repeat(500);
        let original_words = text.split_whitespace().count();
        let chunks = split(&text, 800);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 800);
            // Every boundary is a word boundary
            assert!(!chunk.content.starts_with(char::is_whitespace));
            assert!(!chunk.content.ends_with(char::is_whitespace));
        }
        let total_words: usize = chunks
            .iter()
            .map(|c| c.content.split_whitespace().count())
            .sum();
        assert_eq!(total_words, original_words);
    }

    #[test]
    fn test_oversized_word_is_hard_cut() {
        let text = "a".repeat(2000);
        let chunks = split(&text, 800);

        assert_eq!(
            chunks.iter().map(|c| c.content.chars().count()).collect::<Vec<_>>(),
            vec![800, 800, 400]
        );
    }

    #[test]
    fn test_hard_cut_lands_on_char_boundaries() {
        // Multi-byte characters must not be sliced mid-encoding
        let text = "щ".repeat(20);
        let chunks = split(&text, 7);

        for chunk in &chunks {
            assert!(chunk.content.chars().count() <= 7);
            assert!(chunk.content.chars().all(|c| c == 'щ'));
        }
        let total: usize = chunks.iter().map(|c| c.content.chars().count()).sum();
        assert_eq!(total, 20);
    }

    // ===========================================
    // Invariants across arbitrary input
    // ===========================================

    #[test]
    fn test_indices_are_contiguous_and_final_flag_set() {
        let text = "Sentence one here. Sentence two here. Sentence three here.";
        let chunks = split(text, 25);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert_eq!(chunk.is_final, i == chunks.len() - 1);
        }
    }

    #[test]
    fn test_every_chunk_within_bound_and_nonempty() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        for max in [10, 37, 100, 800] {
            for chunk in split(&text, max) {
                let len = chunk.content.chars().count();
                assert!(len > 0, "empty chunk at bound {max}");
                assert!(len <= max, "chunk of {len} chars exceeds bound {max}");
            }
        }
    }

    #[test]
    fn test_no_non_whitespace_content_lost() {
        let text = "Mixed content: words, numbers 123, and punctuation! \
                    Plus a second line\nwith more text? Certainly.";
        let chunks = split(text, 30);

        let original: Vec<&str> = text.split_whitespace().collect();
        let rejoined = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let recovered: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(recovered, original);
    }
}

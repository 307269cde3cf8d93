//! Sentence and word counts
//!
//! Counting is literal: every `.`, `!` or `?` ends a sentence, so `"!!!"`
//! counts as three. Words are maximal runs of non-whitespace.

use serde::{Deserialize, Serialize};

use crate::readability::count_syllables;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
}

pub fn count_sentences(text: &str) -> usize {
    text.chars().filter(|c| SENTENCE_TERMINATORS.contains(c)).count()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentence, word and syllable totals for `text`
pub fn text_stats(text: &str) -> TextStats {
    TextStats {
        sentences: count_sentences(text),
        words: count_words(text),
        syllables: text.split_whitespace().map(count_syllables).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_terminators() {
        let stats = text_stats("Hello world! Are you there? Yes.");
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.words, 6);
    }

    #[test]
    fn test_repeated_punctuation_is_not_collapsed() {
        assert_eq!(count_sentences("Wait!!! Really?!"), 5);
        assert_eq!(count_sentences("v1.2.3"), 2);
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(count_words("  one\t two\n\nthree  "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(" \n\t "), 0);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(text_stats(""), TextStats::default());
    }
}

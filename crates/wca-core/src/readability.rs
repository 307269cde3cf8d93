//! Flesch Reading Ease scoring
//!
//! `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`
//!
//! Both divisors are floored at 1, so text without terminators counts as a
//! single sentence and empty text scores 206.84 instead of faulting.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::contrast::round2;
use crate::text_stats::text_stats;

/// Scores at or above this read as easy
pub const EASY_THRESHOLD: f64 = 70.0;

/// Scores at or above this (and below easy) read as moderate
pub const MODERATE_THRESHOLD: f64 = 50.0;

static VOWEL_GROUPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadabilityLevel {
    Easy,
    Moderate,
    Difficult,
}

impl ReadabilityLevel {
    pub fn from_score(score: f64) -> Self {
        Self::from_score_with(score, EASY_THRESHOLD, MODERATE_THRESHOLD)
    }

    pub fn from_score_with(score: f64, easy: f64, moderate: f64) -> Self {
        if score >= easy {
            ReadabilityLevel::Easy
        } else if score >= moderate {
            ReadabilityLevel::Moderate
        } else {
            ReadabilityLevel::Difficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadabilityLevel::Easy => "easy",
            ReadabilityLevel::Moderate => "moderate",
            ReadabilityLevel::Difficult => "difficult",
        }
    }
}

impl fmt::Display for ReadabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityResult {
    pub score: f64,
    pub level: ReadabilityLevel,
}

/// Estimate the syllables in a single whitespace-delimited token.
///
/// Latin letters use vowel groups with a silent trailing `e`; each
/// precomposed Hangul block is one syllable. Tokens without letters have none.
pub fn count_syllables(word: &str) -> usize {
    let hangul = word
        .chars()
        .filter(|c| ('\u{AC00}'..='\u{D7A3}').contains(c))
        .count();

    let latin: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if latin.is_empty() {
        return hangul;
    }

    let mut count = VOWEL_GROUPS.find_iter(&latin).count();
    if count > 1 && latin.ends_with('e') && !latin.ends_with("le") {
        count -= 1;
    }

    hangul + count.max(1)
}

/// Flesch Reading Ease score and level for `text`
pub fn readability_score(text: &str) -> ReadabilityResult {
    readability_score_with(text, EASY_THRESHOLD, MODERATE_THRESHOLD)
}

/// Like [`readability_score`], classifying against custom level thresholds
pub fn readability_score_with(text: &str, easy: f64, moderate: f64) -> ReadabilityResult {
    let stats = text_stats(text);
    let score = flesch_reading_ease(stats.sentences, stats.words, stats.syllables);
    ReadabilityResult {
        score,
        level: ReadabilityLevel::from_score_with(score, easy, moderate),
    }
}

/// Flesch Reading Ease from raw counts, rounded to 2 decimals
pub fn flesch_reading_ease(sentences: usize, words: usize, syllables: usize) -> f64 {
    let sentences = sentences.max(1) as f64;
    let word_divisor = words.max(1) as f64;
    let words_per_sentence = words as f64 / sentences;
    let syllables_per_word = syllables as f64 / word_divisor;
    round2(206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word)
}

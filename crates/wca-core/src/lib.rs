//! Core types for WCA (Web Content Accessibility tools)
//!
//! This crate holds the accessibility metrics engine, a set of pure functions
//! for color contrast, font size and readability, along with the chat session
//! and provider trait used by the WCAG assistant.

pub mod analysis;
pub mod color;
pub mod contrast;
pub mod error;
pub mod font;
pub mod llm;
pub mod readability;
pub mod session;
pub mod text_stats;

#[cfg(test)]
mod proptests;

pub use analysis::{
    analyze, analyze_with_policy, AccessibilityReport, AnalysisPolicy, AnalysisRequest, TextType,
};
pub use color::{parse_color, relative_luminance, Color};
pub use contrast::{
    check_contrast, contrast_ratio, ContrastResult, WCAG_AAA_NORMAL_TEXT, WCAG_AA_LARGE_TEXT,
    WCAG_AA_NORMAL_TEXT,
};
pub use error::{Error, Result};
pub use font::{check_font_size, is_font_size_accessible, FontSizeCheck, MIN_BODY_FONT_SIZE_PX};
pub use llm::{ChatProvider, GenerationConfig, GenerationResult, MockChatProvider};
pub use readability::{
    count_syllables, readability_score, readability_score_with, ReadabilityLevel, ReadabilityResult,
};
pub use session::{ChatMessage, ChatSession, Role};
pub use text_stats::{text_stats, TextStats};

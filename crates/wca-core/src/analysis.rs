//! One "analyze" action: validate the form input, then run every metric

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::{parse_color, Color};
use crate::contrast::{
    check_contrast_with, ContrastResult, WCAG_AAA_NORMAL_TEXT, WCAG_AA_LARGE_TEXT,
    WCAG_AA_NORMAL_TEXT,
};
use crate::font::{check_font_size_with, FontSizeCheck, MIN_BODY_FONT_SIZE_PX};
use crate::readability::{
    readability_score_with, ReadabilityResult, EASY_THRESHOLD, MODERATE_THRESHOLD,
};
use crate::text_stats::{text_stats, TextStats};
use crate::{Error, Result};

pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
pub const DEFAULT_FONT_SIZE_PX: u32 = 16;

/// Role of the text being checked.
///
/// Echoed in the report; thresholds do not vary by type yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    #[default]
    Body,
    Heading,
    Link,
    Button,
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextType::Body => "body",
            TextType::Heading => "heading",
            TextType::Link => "link",
            TextType::Button => "button",
        };
        f.write_str(name)
    }
}

/// Thresholds applied by [`analyze_with_policy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPolicy {
    pub min_contrast_aa: f64,
    pub min_contrast_aaa: f64,
    pub min_contrast_aa_large: f64,
    pub min_font_size_px: u32,
    pub easy_threshold: f64,
    pub moderate_threshold: f64,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            min_contrast_aa: WCAG_AA_NORMAL_TEXT,
            min_contrast_aaa: WCAG_AAA_NORMAL_TEXT,
            min_contrast_aa_large: WCAG_AA_LARGE_TEXT,
            min_font_size_px: MIN_BODY_FONT_SIZE_PX,
            easy_threshold: EASY_THRESHOLD,
            moderate_threshold: MODERATE_THRESHOLD,
        }
    }
}

/// Raw form input for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    pub foreground: String,
    pub background: String,
    pub font_size_px: u32,
    pub text_type: TextType,
}

impl AnalysisRequest {
    /// A request for `text` with the form defaults for everything else
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            foreground: DEFAULT_FOREGROUND.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            text_type: TextType::default(),
        }
    }

    pub fn with_colors(mut self, foreground: impl Into<String>, background: impl Into<String>) -> Self {
        self.foreground = foreground.into();
        self.background = background.into();
        self
    }

    pub fn with_font_size(mut self, font_size_px: u32) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    pub fn with_text_type(mut self, text_type: TextType) -> Self {
        self.text_type = text_type;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityReport {
    pub foreground: Color,
    pub background: Color,
    pub text_type: TextType,
    pub contrast: ContrastResult,
    pub font_size: FontSizeCheck,
    pub readability: ReadabilityResult,
    pub stats: TextStats,
}

impl AccessibilityReport {
    /// Whether the text meets every required check (AA contrast and font size)
    pub fn passes(&self) -> bool {
        self.contrast.passes_aa && self.font_size.accessible
    }
}

/// Analyze `request` with the default WCAG thresholds
pub fn analyze(request: &AnalysisRequest) -> Result<AccessibilityReport> {
    analyze_with_policy(request, &AnalysisPolicy::default())
}

pub fn analyze_with_policy(
    request: &AnalysisRequest,
    policy: &AnalysisPolicy,
) -> Result<AccessibilityReport> {
    if request.text.trim().is_empty() {
        return Err(Error::EmptyInput("text to analyze must not be empty".to_string()));
    }

    let foreground = parse_field("foreground", &request.foreground)?;
    let background = parse_field("background", &request.background)?;

    let stats = text_stats(&request.text);
    let readability = readability_score_with(
        &request.text,
        policy.easy_threshold,
        policy.moderate_threshold,
    );

    let report = AccessibilityReport {
        foreground,
        background,
        text_type: request.text_type,
        contrast: check_contrast_with(foreground, background, policy),
        font_size: check_font_size_with(request.font_size_px, policy.min_font_size_px),
        readability,
        stats,
    };

    tracing::debug!(
        ratio = report.contrast.ratio,
        score = report.readability.score,
        words = report.stats.words,
        "analysis complete"
    );

    Ok(report)
}

fn parse_field(field: &str, spec: &str) -> Result<Color> {
    parse_color(spec).map_err(|e| match e {
        Error::InvalidColor(msg) => Error::InvalidColor(format!("{} color: {}", field, msg)),
        other => other,
    })
}

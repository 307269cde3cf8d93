//! Contrast ratio between two colors - WCAG 1.4.3 / 1.4.6
//!
//! - AA: 4.5:1 for normal text, 3:1 for large text
//! - AAA: 7:1 for normal text

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisPolicy;
use crate::color::{relative_luminance, Color};

/// WCAG AA minimum for normal-size text
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;

/// WCAG AA minimum for large text (18pt, or 14pt bold)
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;

/// WCAG AAA minimum for normal-size text
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;

/// Outcome of a contrast check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    pub ratio: f64,
    pub passes_aa: bool,
    pub passes_aaa: bool,
    pub passes_aa_large: bool,
}

/// Contrast ratio between two colors, rounded to 2 decimals.
///
/// Order independent; always within [1.0, 21.0].
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let l1 = relative_luminance(fg);
    let l2 = relative_luminance(bg);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    let ratio = round2((lighter + 0.05) / (darker + 0.05));
    ratio.clamp(1.0, 21.0)
}

/// Check a color pair against the default WCAG thresholds
pub fn check_contrast(fg: Color, bg: Color) -> ContrastResult {
    check_contrast_with(fg, bg, &AnalysisPolicy::default())
}

/// Check a color pair against the thresholds of `policy`
pub fn check_contrast_with(fg: Color, bg: Color, policy: &AnalysisPolicy) -> ContrastResult {
    let ratio = contrast_ratio(fg, bg);
    ContrastResult {
        ratio,
        passes_aa: ratio >= policy.min_contrast_aa,
        passes_aaa: ratio >= policy.min_contrast_aaa,
        passes_aa_large: ratio >= policy.min_contrast_aa_large,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Font size adequacy

use serde::{Deserialize, Serialize};

/// Smallest body text size considered readable, in CSS pixels
pub const MIN_BODY_FONT_SIZE_PX: u32 = 16;

/// Outcome of a font size check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizeCheck {
    pub size_px: u32,
    pub accessible: bool,
}

/// Whether `size_px` meets the default minimum body text size
pub fn is_font_size_accessible(size_px: u32) -> bool {
    size_px >= MIN_BODY_FONT_SIZE_PX
}

pub fn check_font_size(size_px: u32) -> FontSizeCheck {
    check_font_size_with(size_px, MIN_BODY_FONT_SIZE_PX)
}

pub fn check_font_size_with(size_px: u32, min_size_px: u32) -> FontSizeCheck {
    FontSizeCheck {
        size_px,
        accessible: size_px >= min_size_px,
    }
}

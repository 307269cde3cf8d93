//! Color parsing and relative luminance
//!
//! Colors arrive from form fields as strings: `#RRGGBB`, the `#RGB`
//! shorthand, or a CSS named color. Luminance follows the WCAG 2.x
//! definition (sRGB companding, BT.709 weights).
//! <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// sRGB channel value at or below which the linear segment applies
pub const SRGB_LINEAR_THRESHOLD: f64 = 0.03928;

const LUMA_RED: f64 = 0.2126;
const LUMA_GREEN: f64 = 0.7152;
const LUMA_BLUE: f64 = 0.0722;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Render as upper-case `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance in [0, 1]
    pub fn luminance(&self) -> f64 {
        relative_luminance(*self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

/// Parse a hex or named color.
///
/// Leading/trailing whitespace and letter case are ignored.
pub fn parse_color(spec: &str) -> Result<Color> {
    let trimmed = spec.trim();
    let parsed = match trimmed.strip_prefix('#') {
        Some(digits) => parse_hex_digits(digits),
        None => parse_named_color(&trimmed.to_ascii_lowercase()),
    };

    parsed.ok_or_else(|| {
        Error::InvalidColor(format!(
            "'{}' is neither a hex color (#RRGGBB) nor a known color name",
            spec
        ))
    })
}

fn parse_hex_digits(digits: &str) -> Option<Color> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => Some(Color::new(
            channel(&digits[0..1].repeat(2))?,
            channel(&digits[1..2].repeat(2))?,
            channel(&digits[2..3].repeat(2))?,
        )),
        6 => Some(Color::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

/// Look up a lower-case CSS color name
pub fn parse_named_color(name: &str) -> Option<Color> {
    let rgb = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "gray" | "grey" => (128, 128, 128),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "aqua" | "cyan" => (0, 255, 255),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "fuchsia" | "magenta" => (255, 0, 255),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "brown" => (165, 42, 42),
        "pink" => (255, 192, 203),
        _ => return None,
    };
    Some(Color::new(rgb.0, rgb.1, rgb.2))
}

fn linearize(channel: u8) -> f64 {
    let x = f64::from(channel) / 255.0;
    if x <= SRGB_LINEAR_THRESHOLD {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

/// Calculate relative luminance per WCAG 2.x
pub fn relative_luminance(color: Color) -> f64 {
    LUMA_RED * linearize(color.r) + LUMA_GREEN * linearize(color.g) + LUMA_BLUE * linearize(color.b)
}

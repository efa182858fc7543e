//! Spans and merged lines.

use serde::{Deserialize, Serialize};

use crate::text::{is_all_caps, is_bold_font};

/// Round a font size to one decimal place.
pub fn round_size(size: f32) -> f32 {
    (size * 10.0).round() / 10.0
}

/// Integer key for a font size at 0.1pt precision.
///
/// Sizes are compared through this key so that equal rounded sizes always
/// compare equal.
pub fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// A styled run of text with its emphasis flags resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// Trimmed text content
    pub text: String,
    /// Font size rounded to 0.1pt
    pub size: f32,
    /// Font name
    pub font: String,
    /// Whether the font name denotes a bold face
    pub bold: bool,
    /// Whether the text is an all-caps run
    pub caps: bool,
}

impl Span {
    /// Create a span, rounding the size and resolving emphasis flags.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        let font = font.into();
        let bold = is_bold_font(&font);
        let caps = is_all_caps(&text);
        Self {
            text,
            size: round_size(size),
            font,
            bold,
            caps,
        }
    }

    /// Whether this span emphasizes its line.
    pub fn is_emphasized(&self) -> bool {
        self.bold || self.caps
    }
}

/// A logical text line merged from one or more spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Merged text, trailing connectors stripped
    pub text: String,
    /// Largest rounded span size on the line
    pub size: f32,
    /// Font of the first surviving span
    pub font: String,
    /// True if any span is bold or all-caps
    pub emphasized: bool,
    /// Page number (1-indexed)
    pub page: u32,
}

impl Line {
    /// Size key of this line (see [`size_key`]).
    pub fn size_key(&self) -> i32 {
        size_key(self.size)
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        crate::text::word_count(&self.text)
    }

    /// Number of characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

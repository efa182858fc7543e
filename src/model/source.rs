//! Raw page content as handed over by a document source.

use serde::{Deserialize, Serialize};

/// A single page of styled text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePage {
    /// Page number (1-indexed). Zero means "use the page's position".
    #[serde(default)]
    pub number: u32,

    /// Text blocks in reading order
    #[serde(default)]
    pub blocks: Vec<SourceBlock>,
}

impl SourcePage {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: SourceBlock) {
        self.blocks.push(block);
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of spans on the page.
    pub fn span_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.lines)
            .map(|l| l.spans.len())
            .sum()
    }
}

/// A block of lines (paragraph-like region).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceBlock {
    /// Lines in the block, top to bottom
    #[serde(default)]
    pub lines: Vec<SourceLine>,
}

impl SourceBlock {
    /// Create a block from lines.
    pub fn new(lines: Vec<SourceLine>) -> Self {
        Self { lines }
    }
}

/// A visual line of spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceLine {
    /// Spans on the line, left to right
    #[serde(default)]
    pub spans: Vec<SourceSpan>,
}

impl SourceLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<SourceSpan>) -> Self {
        Self { spans }
    }
}

/// A run of text sharing one font and size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpan {
    /// The text content
    pub text: String,

    /// Font size in points
    pub size: f32,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font: String,
}

impl SourceSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
        }
    }
}

//! Outline entries and per-document bundles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heading level, largest font tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Level for the n-th largest distinct size (0 = largest).
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(Self::H1),
            1 => Some(Self::H2),
            2 => Some(Self::H3),
            3 => Some(Self::H4),
            4 => Some(Self::H5),
            5 => Some(Self::H6),
            _ => None,
        }
    }

    /// Numeric depth (1 for H1).
    pub fn depth(self) -> u8 {
        self as u8 + 1
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A classified heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Extraction output for one document: its outline and per-page text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBundle {
    /// Headings in confidence order
    pub outline: Vec<OutlineEntry>,
    /// Page number to concatenated page text
    pub text_by_page: BTreeMap<u32, String>,
}

impl DocumentBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty() && self.text_by_page.is_empty()
    }

    /// Get the text of a page, or an empty string.
    pub fn page_text(&self, page: u32) -> &str {
        self.text_by_page
            .get(&page)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of headings in the outline.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_from_rank() {
        assert_eq!(HeadingLevel::from_rank(0), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_rank(2), Some(HeadingLevel::H3));
        assert_eq!(HeadingLevel::from_rank(6), None);
        assert_eq!(HeadingLevel::H2.to_string(), "H2");
    }

    #[test]
    fn test_empty_bundle_json() {
        let bundle = DocumentBundle::new();
        assert!(bundle.is_empty());
        let json = serde_json::to_string(&bundle).unwrap();
        assert_eq!(json, r#"{"outline":[],"text_by_page":{}}"#);
    }

    #[test]
    fn test_bundle_json_shape() {
        let mut bundle = DocumentBundle::new();
        bundle
            .outline
            .push(OutlineEntry::new(HeadingLevel::H1, "Getting Started Guide", 1));
        bundle.text_by_page.insert(1, "Getting Started Guide".into());

        let json = serde_json::to_string(&bundle).unwrap();
        assert!(json.contains(r#""level":"H1""#));
        assert!(json.contains(r#""1":"Getting Started Guide""#));
        assert_eq!(bundle.page_text(2), "");
    }
}

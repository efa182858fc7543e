//! Outline extraction: lines, headings, and page text from source pages.

mod classify;
mod lines;
mod options;
mod page_text;

pub use classify::HeadingClassifier;
pub use lines::{aggregate_lines, LineAggregator, SizePool};
pub use options::OutlineOptions;
pub use page_text::aggregate_page_text;

use crate::model::{DocumentBundle, SourcePage};

/// Extracts a [`DocumentBundle`] from a document's pages.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    classifier: HeadingClassifier,
}

impl OutlineExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            classifier: HeadingClassifier::new(options),
        }
    }

    /// Run line aggregation, heading classification, and page text aggregation.
    ///
    /// A document without any extractable text yields an empty bundle.
    pub fn extract(&self, pages: &[SourcePage]) -> DocumentBundle {
        let (lines, sizes) = aggregate_lines(pages);

        if sizes.is_empty() {
            log::debug!("No text extracted from {} pages", pages.len());
            return DocumentBundle::new();
        }

        let outline = self.classifier.classify(&lines, &sizes);
        let text_by_page = aggregate_page_text(&lines);

        log::debug!(
            "Extracted {} lines, {} headings across {} pages",
            lines.len(),
            outline.len(),
            text_by_page.len()
        );

        DocumentBundle {
            outline,
            text_by_page,
        }
    }
}

/// Extract an outline from pages with the given options.
pub fn extract_outline(pages: &[SourcePage], options: &OutlineOptions) -> DocumentBundle {
    OutlineExtractor::new(options.clone()).extract(pages)
}

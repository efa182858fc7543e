//! Line aggregation: merge source spans into logical lines.

use std::collections::BTreeMap;

use crate::model::{size_key, Line, SourceLine, SourcePage, Span};
use crate::text::{has_content, strip_trailing_connectors};

/// Document-wide pool of observed span sizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizePool {
    /// Size key (0.1pt precision) to number of spans
    histogram: BTreeMap<i32, usize>,
}

impl SizePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a size observation.
    pub fn add_size(&mut self, size: f32) {
        *self.histogram.entry(size_key(size)).or_insert(0) += 1;
    }

    /// Check if no size was observed.
    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.histogram.values().sum()
    }

    /// The `n` largest distinct size keys, largest first.
    pub fn largest_distinct(&self, n: usize) -> Vec<i32> {
        self.histogram.keys().rev().take(n).copied().collect()
    }

    /// The largest observed size key.
    pub fn largest(&self) -> Option<i32> {
        self.histogram.keys().next_back().copied()
    }
}

/// Merges spans into lines and accumulates the document's size pool.
#[derive(Debug, Default)]
pub struct LineAggregator {
    lines: Vec<Line>,
    sizes: SizePool,
}

impl LineAggregator {
    /// Create a new aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate every line of a page.
    pub fn add_page(&mut self, page: &SourcePage, page_number: u32) {
        for block in &page.blocks {
            for line in &block.lines {
                if let Some(merged) = self.merge_line(line, page_number) {
                    self.lines.push(merged);
                }
            }
        }
    }

    /// Finish aggregation, returning lines in encounter order and the size pool.
    pub fn finish(self) -> (Vec<Line>, SizePool) {
        (self.lines, self.sizes)
    }

    fn merge_line(&mut self, line: &SourceLine, page_number: u32) -> Option<Line> {
        let spans: Vec<Span> = line
            .spans
            .iter()
            .filter(|s| has_content(&s.text))
            .map(|s| Span::new(s.text.as_str(), s.size, s.font.as_str()))
            .collect();

        if spans.is_empty() {
            return None;
        }

        for span in &spans {
            self.sizes.add_size(span.size);
        }

        let merged = spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let text = strip_trailing_connectors(&merged);
        if text.is_empty() {
            return None;
        }

        let size = spans.iter().map(|s| s.size).fold(f32::MIN, f32::max);

        Some(Line {
            text: text.to_string(),
            size,
            font: spans[0].font.clone(),
            emphasized: spans.iter().any(Span::is_emphasized),
            page: page_number,
        })
    }
}

/// Aggregate all pages of a document into lines plus its size pool.
///
/// Pages numbered 0 take their 1-based position instead.
pub fn aggregate_lines(pages: &[SourcePage]) -> (Vec<Line>, SizePool) {
    let mut aggregator = LineAggregator::new();
    for (idx, page) in pages.iter().enumerate() {
        let number = if page.number == 0 {
            idx as u32 + 1
        } else {
            page.number
        };
        aggregator.add_page(page, number);
    }
    aggregator.finish()
}

//! Heading classification from the document's font size distribution.

use std::collections::HashMap;

use super::lines::SizePool;
use super::options::OutlineOptions;
use crate::model::{HeadingLevel, Line, OutlineEntry};
use crate::text::is_generic_heading;

/// Assigns heading levels to lines and produces a capped outline.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    options: OutlineOptions,
}

impl HeadingClassifier {
    /// Create a classifier with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Map the largest distinct sizes to heading levels, largest first.
    pub fn level_map(&self, pool: &SizePool) -> HashMap<i32, HeadingLevel> {
        pool.largest_distinct(self.options.heading_levels)
            .into_iter()
            .enumerate()
            .filter_map(|(rank, key)| HeadingLevel::from_rank(rank).map(|level| (key, level)))
            .collect()
    }

    /// Classify lines into an outline in descending confidence order.
    ///
    /// Equal confidences keep the lines' encounter order.
    pub fn classify(&self, lines: &[Line], pool: &SizePool) -> Vec<OutlineEntry> {
        let Some(largest) = pool.largest() else {
            return Vec::new();
        };
        let levels = self.level_map(pool);

        let mut scored: Vec<(f32, OutlineEntry)> = lines
            .iter()
            .filter(|line| self.passes_length_gate(line))
            .filter(|line| !is_generic_heading(&line.text))
            .filter_map(|line| {
                let level = *levels.get(&line.size_key())?;
                if !line.emphasized && line.size_key() != largest {
                    return None;
                }
                Some((
                    self.confidence(line),
                    OutlineEntry::new(level, line.text.clone(), line.page),
                ))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        scored
            .into_iter()
            .take(self.options.max_headings)
            .map(|(_, entry)| entry)
            .collect()
    }

    /// Ranking score: size, plus a bonus when emphasized.
    pub fn confidence(&self, line: &Line) -> f32 {
        if line.emphasized {
            line.size + self.options.emphasis_bonus
        } else {
            line.size
        }
    }

    fn passes_length_gate(&self, line: &Line) -> bool {
        line.word_count() >= self.options.min_words && line.char_count() >= self.options.min_chars
    }
}

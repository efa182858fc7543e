//! Heading detection thresholds.

/// Options controlling heading classification.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineOptions {
    /// Maximum headings kept per document
    pub max_headings: usize,

    /// Minimum heading length in characters
    pub min_chars: usize,

    /// Minimum heading length in words
    pub min_words: usize,

    /// Number of largest distinct font sizes mapped to heading levels (1-6)
    pub heading_levels: usize,

    /// Confidence bonus for emphasized (bold or all-caps) lines
    pub emphasis_bonus: f32,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-document heading cap.
    pub fn with_max_headings(mut self, max: usize) -> Self {
        self.max_headings = max;
        self
    }

    /// Set the minimum heading length in characters.
    pub fn with_min_chars(mut self, chars: usize) -> Self {
        self.min_chars = chars;
        self
    }

    /// Set the minimum heading length in words.
    pub fn with_min_words(mut self, words: usize) -> Self {
        self.min_words = words;
        self
    }

    /// Set how many size tiers become heading levels (clamped to 1-6).
    pub fn with_heading_levels(mut self, levels: usize) -> Self {
        self.heading_levels = levels.clamp(1, 6);
        self
    }

    /// Set the emphasis bonus added to a heading's confidence.
    pub fn with_emphasis_bonus(mut self, bonus: f32) -> Self {
        self.emphasis_bonus = bonus;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_headings: 20,
            min_chars: 15,
            min_words: 3,
            heading_levels: 3,
            emphasis_bonus: 2.0,
        }
    }
}

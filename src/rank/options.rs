//! Ranking thresholds.

/// Options controlling candidate excerpts and result size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOptions {
    /// Maximum number of ranked sections returned
    pub top_k: usize,

    /// Maximum excerpt length in characters
    pub excerpt_chars: usize,

    /// Number of period-delimited segments kept in an excerpt
    pub excerpt_sentences: usize,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections returned.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Set the excerpt length limit in characters.
    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Set how many period-delimited segments an excerpt keeps.
    pub fn with_excerpt_sentences(mut self, sentences: usize) -> Self {
        self.excerpt_sentences = sentences;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: 10,
            excerpt_chars: 200,
            excerpt_sentences: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_options_builder() {
        let options = RankOptions::new()
            .with_top_k(3)
            .with_excerpt_chars(80)
            .with_excerpt_sentences(1);
        assert_eq!(options.top_k, 3);
        assert_eq!(options.excerpt_chars, 80);
        assert_eq!(options.excerpt_sentences, 1);

        let defaults = RankOptions::default();
        assert_eq!(defaults.top_k, 10);
        assert_eq!(defaults.excerpt_chars, 200);
        assert_eq!(defaults.excerpt_sentences, 2);
    }
}

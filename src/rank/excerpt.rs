//! Page-text excerpts for ranking candidates.
//!
//! Sentences are found by splitting on literal periods. This is not
//! locale-aware: decimal numbers and abbreviations split early, scripts with
//! other sentence terminators are not split at all, and the character limit
//! may cut mid-word.

use crate::text::truncate_chars;

/// Keep the first `sentences` period-delimited segments of `page_text`,
/// rejoined with `". "`, truncated to `max_chars` characters.
pub fn refine_excerpt(page_text: &str, sentences: usize, max_chars: usize) -> String {
    let joined = page_text
        .split('.')
        .take(sentences)
        .collect::<Vec<_>>()
        .join(". ");
    truncate_chars(&joined, max_chars).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_two_segments() {
        let text = "Nice has beaches. The old town is lovely. Markets open daily.";
        assert_eq!(
            refine_excerpt(text, 2, 200),
            "Nice has beaches.  The old town is lovely"
        );
    }

    #[test]
    fn test_truncates_by_characters() {
        let text = "é".repeat(300);
        let excerpt = refine_excerpt(&text, 2, 200);
        assert_eq!(excerpt.chars().count(), 200);
    }

    #[test]
    fn test_decimal_numbers_split_early() {
        assert_eq!(refine_excerpt("Costs 3.5 euros. Cheap", 2, 200), "Costs 3. 5 euros");
    }

    #[test]
    fn test_empty_and_unpunctuated() {
        assert_eq!(refine_excerpt("", 2, 200), "");
        assert_eq!(refine_excerpt("東京の観光案内", 2, 200), "東京の観光案内");
    }
}

//! Per-page text aggregation.

use std::collections::BTreeMap;

use crate::model::Line;

/// Join every line's text per page with single spaces, in encounter order.
pub fn aggregate_page_text(lines: &[Line]) -> BTreeMap<u32, String> {
    let mut pages: BTreeMap<u32, String> = BTreeMap::new();
    for line in lines {
        let text = pages.entry(line.page).or_default();
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&line.text);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, page: u32) -> Line {
        Line {
            text: text.to_string(),
            size: 10.0,
            font: String::new(),
            emphasized: false,
            page,
        }
    }

    #[test]
    fn test_aggregate_page_text() {
        let lines = vec![
            line("Heading", 1),
            line("First sentence.", 1),
            line("Other page", 3),
            line("Second sentence", 1),
        ];
        let pages = aggregate_page_text(&lines);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[&1], "Heading First sentence. Second sentence");
        assert_eq!(pages[&3], "Other page");
        assert!(!pages.contains_key(&2));
    }

    #[test]
    fn test_no_lines() {
        assert!(aggregate_page_text(&[]).is_empty());
    }
}

//! Shared text predicates used by both extraction and ranking.

/// Generic heading terms that never make a useful section.
///
/// Consulted twice: once when classifying headings and once more when
/// building ranking candidates. Entries are already normalized.
pub const GENERIC_HEADINGS: &[&str] = &["introduction", "summary", "overview", "trip"];

/// Trailing glyphs stripped from merged line text.
const TRAILING_CONNECTORS: &[char] = &[
    ':', '.', '、', '।', '|', '›', '»', '→', '・', '\\', '-', '–', '—',
];

/// Normalize heading text for comparison (trimmed, lower-cased).
pub fn normalize_title(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Check whether a heading is on the generic-term denylist.
pub fn is_generic_heading(text: &str) -> bool {
    let normalized = normalize_title(text);
    GENERIC_HEADINGS.iter().any(|term| *term == normalized)
}

/// Check whether text carries actual content (any letter or digit, any script).
pub fn has_content(text: &str) -> bool {
    text.trim().chars().any(|c| c.is_alphanumeric() || c == '_')
}

/// Strip a trailing run of connector/punctuation glyphs, then trim.
pub fn strip_trailing_connectors(text: &str) -> &str {
    text.trim_end_matches(TRAILING_CONNECTORS).trim()
}

/// Check whether a font name denotes a bold face.
pub fn is_bold_font(font_name: &str) -> bool {
    font_name.contains("Bold") || font_name.ends_with("BoldMT")
}

/// Check whether span text is an all-caps run longer than three characters.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().count() > 3
        && text.chars().any(|c| c.is_uppercase())
        && !text.chars().any(|c| c.is_lowercase())
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncate text to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

//! Canonical comparison form for lines and queries

/// Strip every whitespace character from `line`.
///
/// Uses the Unicode `White_Space` property, so ideographic spaces (U+3000)
/// common in Japanese transcripts are removed as well. Nothing else changes:
/// case, punctuation and width are compared verbatim.
pub fn normalize(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

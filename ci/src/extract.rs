//! Context window extraction and emphasis markup

use std::ops::Range;

use crate::index::{CorpusIndex, MatchRange};

/// Separator inserted between joined context lines
pub const LINE_BREAK: &str = "<br>";

/// Opening emphasis marker
pub const EMPHASIS_OPEN: &str = "<b>";

/// Closing emphasis marker
pub const EMPHASIS_CLOSE: &str = "</b>";

/// How many lines to keep around the matched line
///
/// Behaves like grep's context flags, anchored at the match's first line:
/// the window is `[first - before, first + after)`, clamped to the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    pub before: usize,
    pub after: usize,
}

impl ContextWindow {
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Line interval for a match starting at `first_line` in a corpus of `total` lines
    pub fn lines(&self, first_line: usize, total: usize) -> Range<usize> {
        let start = first_line.saturating_sub(self.before).min(total);
        let end = first_line.saturating_add(self.after).min(total);
        start..end.max(start)
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            before: crate::DEFAULT_CONTEXT_BEFORE,
            after: crate::DEFAULT_CONTEXT_AFTER,
        }
    }
}

/// Join the original lines around `range` and highlight `emphasis_token`
pub fn extract(index: &CorpusIndex, range: MatchRange, window: ContextWindow, emphasis_token: Option<&str>) -> String {
    let lines = window.lines(range.first_line, index.len());
    let joined = index.slice_original(lines).join(LINE_BREAK);

    match emphasis_token {
        Some(token) if !token.is_empty() => emphasize(&joined, token),
        _ => joined,
    }
}

/// Wrap every literal occurrence of `token` in emphasis markers.
///
/// Plain substring replacement: a token split by a line break marker is left
/// untouched.
pub fn emphasize(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }
    text.replace(token, &format!("{EMPHASIS_OPEN}{token}{EMPHASIS_CLOSE}"))
}

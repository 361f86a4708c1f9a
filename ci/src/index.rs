//! Line-offset index over a normalized corpus

use std::ops::Range;

use tracing::debug;

use crate::normalize::normalize;

/// A single corpus line with its position in the flattened corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Verbatim line text
    pub original: String,
    /// Whitespace-stripped form of `original`
    pub normalized: String,
    /// Byte offset of `normalized` inside the flattened corpus
    pub start_offset: usize,
}

impl LineRecord {
    /// Byte offset one past the end of this line in the flattened corpus
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.normalized.len()
    }
}

/// Half-open interval of line indices `[first_line, last_line_exclusive)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRange {
    pub first_line: usize,
    pub last_line_exclusive: usize,
}

impl MatchRange {
    pub fn new(first_line: usize, last_line_exclusive: usize) -> Self {
        Self {
            first_line,
            last_line_exclusive,
        }
    }

    /// Number of lines spanned by the match
    pub fn len(&self) -> usize {
        self.last_line_exclusive.saturating_sub(self.first_line)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<MatchRange> for Range<usize> {
    fn from(range: MatchRange) -> Self {
        range.first_line..range.last_line_exclusive
    }
}

/// Immutable search index built once from an ordered line list
///
/// All records live in one contiguous vector ordered by input line, so
/// `start_offset` is monotonic and offset→line lookups are binary searches.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    records: Vec<LineRecord>,
    flattened: String,
}

impl CorpusIndex {
    /// Build the index from lines in corpus order
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut records = Vec::new();
        let mut flattened = String::new();

        for line in lines {
            let original = line.into();
            let normalized = normalize(&original);
            let start_offset = flattened.len();
            flattened.push_str(&normalized);
            records.push(LineRecord {
                original,
                normalized,
                start_offset,
            });
        }

        debug!(line_count = records.len(), flattened_len = flattened.len(), "Built corpus index");
        Self { records, flattened }
    }

    /// Number of lines in the corpus
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LineRecord] {
        &self.records
    }

    /// Concatenation of every normalized line; the search corpus
    pub fn flattened(&self) -> &str {
        &self.flattened
    }

    /// Find the lines containing the first occurrence of `query`.
    ///
    /// Both sides are compared in normalized form. Returns `None` when the
    /// query does not occur, and also when it normalizes to the empty string:
    /// a blank sentence carries nothing to anchor a match on.
    pub fn locate(&self, query: &str) -> Option<MatchRange> {
        let needle = normalize(query);
        if needle.is_empty() {
            debug!("locate: query is blank after normalization");
            return None;
        }

        let Some(start) = self.flattened.find(&needle) else {
            debug!(query_len = needle.len(), "locate: no occurrence");
            return None;
        };
        let end = start + needle.len();

        let range = self.lines_for_offsets(start, end);
        debug!(start, end, first_line = range.first_line, last_line = range.last_line_exclusive, "locate: found");
        Some(range)
    }

    /// Map a non-empty byte span of the flattened corpus to its line range
    fn lines_for_offsets(&self, start: usize, end: usize) -> MatchRange {
        // greatest i with start_offset <= start; records[0] starts at 0
        let first_line = self
            .records
            .partition_point(|r| r.start_offset <= start)
            .saturating_sub(1);
        // smallest j with start_offset >= end, or len
        let last_line_exclusive = self.records.partition_point(|r| r.start_offset < end);
        MatchRange::new(first_line, last_line_exclusive)
    }

    /// Original text of the lines in `lines`, clamped to the corpus
    pub fn slice_original(&self, lines: Range<usize>) -> Vec<&str> {
        let end = lines.end.min(self.records.len());
        let start = lines.start.min(end);
        self.records[start..end].iter().map(|r| r.original.as_str()).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for CorpusIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::build(iter)
    }
}

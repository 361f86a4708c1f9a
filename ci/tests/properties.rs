//! Property tests for normalization, indexing and lookup

use corpusindex::{CorpusIndex, MatchRange, normalize};
use proptest::prelude::*;

/// Short lines over a small alphabet so repeats and whitespace are common
fn line() -> impl Strategy<Value = String> {
    "[ab \t\u{3000}猫]{0,8}"
}

fn corpus() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line(), 0..12)
}

/// Straightforward scan kept as the reference for the binary search
fn locate_linear(lines: &[String], query: &str) -> Option<MatchRange> {
    let needle = normalize(query);
    if needle.is_empty() {
        return None;
    }
    let flattened: String = lines.iter().map(|l| normalize(l)).collect();
    let start = flattened.find(&needle)?;
    let end = start + needle.len();

    let mut offsets = Vec::with_capacity(lines.len());
    let mut running = 0;
    for l in lines {
        offsets.push(running);
        running += normalize(l).len();
    }

    let mut first = 0;
    for (i, offset) in offsets.iter().enumerate() {
        if *offset <= start {
            first = i;
        } else {
            break;
        }
    }
    let last = offsets.iter().position(|o| *o >= end).unwrap_or(lines.len());
    Some(MatchRange::new(first, last))
}

proptest! {
    #[test]
    fn normalization_is_idempotent(s in ".*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn flattened_is_concatenation_of_normalized_lines(lines in corpus()) {
        let index = CorpusIndex::build(lines.clone());
        let expected: String = lines.iter().map(|l| normalize(l)).collect();
        prop_assert_eq!(index.flattened(), expected.as_str());
    }

    #[test]
    fn offsets_are_contiguous(lines in corpus()) {
        let index = CorpusIndex::build(lines);
        for pair in index.records().windows(2) {
            prop_assert_eq!(pair[0].end_offset(), pair[1].start_offset);
        }
    }

    #[test]
    fn located_range_contains_query(lines in corpus(), i in 0usize..12, len in 1usize..4) {
        prop_assume!(!lines.is_empty());
        let i = i % lines.len();
        let j = (i + len).min(lines.len());
        let query: String = lines[i..j].concat();
        prop_assume!(!normalize(&query).is_empty());

        let index = CorpusIndex::build(lines.clone());
        let range = index.locate(&query);
        prop_assert!(range.is_some());
        let range = range.unwrap();

        let covered: String = lines[range.first_line..range.last_line_exclusive]
            .iter()
            .map(|l| normalize(l))
            .collect();
        prop_assert!(covered.contains(&normalize(&query)));
    }

    #[test]
    fn binary_search_matches_linear_scan(lines in corpus(), query in "[ab猫 ]{0,5}") {
        let index = CorpusIndex::build(lines.clone());
        prop_assert_eq!(index.locate(&query), locate_linear(&lines, &query));
    }

    #[test]
    fn absent_query_is_not_found(lines in prop::collection::vec("[ab ]{0,6}", 0..8)) {
        let index = CorpusIndex::build(lines);
        prop_assert_eq!(index.locate("c"), None);
    }
}

#[test]
fn first_occurrence_wins() {
    let index = CorpusIndex::build(["x", "same line", "y", "same", "line"]);
    assert_eq!(index.locate("sameline"), Some(MatchRange::new(1, 2)));
}

#[test]
fn scenario_hello_world() {
    let index = CorpusIndex::build(["Hello", "World", "Foo Bar"]);
    assert_eq!(index.locate("HelloWorld"), Some(MatchRange::new(0, 2)));
    assert_eq!(index.locate("Zzz"), None);
}

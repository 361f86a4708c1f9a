//! Batch matching of query sentences against one corpus

use tracing::{debug, info};

use crate::extract::{ContextWindow, extract};
use crate::index::CorpusIndex;

/// A sentence to locate, tagged with the caller's identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord<Id> {
    /// Opaque key back into the caller's store
    pub identifier: Id,
    /// Text to locate in the corpus
    pub sentence: String,
    /// Substring to wrap in emphasis markers inside the context
    pub emphasis_token: Option<String>,
}

impl<Id> QueryRecord<Id> {
    pub fn new(identifier: Id, sentence: impl Into<String>) -> Self {
        Self {
            identifier,
            sentence: sentence.into(),
            emphasis_token: None,
        }
    }

    pub fn with_emphasis(mut self, token: impl Into<String>) -> Self {
        self.emphasis_token = Some(token.into());
        self
    }
}

/// Context text produced for a matched query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextResult<Id> {
    pub identifier: Id,
    pub context_text: String,
}

/// Runs queries against a fixed index with a fixed context window
#[derive(Debug, Clone, Copy)]
pub struct MatchDriver<'a> {
    index: &'a CorpusIndex,
    window: ContextWindow,
}

impl<'a> MatchDriver<'a> {
    pub fn new(index: &'a CorpusIndex, window: ContextWindow) -> Self {
        Self { index, window }
    }

    /// Locate one query and build its context, or `None` if it does not occur
    pub fn resolve<Id: Clone>(&self, query: &QueryRecord<Id>) -> Option<ContextResult<Id>> {
        let range = self.index.locate(&query.sentence)?;
        let context_text = extract(self.index, range, self.window, query.emphasis_token.as_deref());
        Some(ContextResult {
            identifier: query.identifier.clone(),
            context_text,
        })
    }

    /// Resolve every query in order, silently skipping those without a match
    pub fn run<'q, Id, I>(&self, queries: I) -> Vec<ContextResult<Id>>
    where
        Id: Clone + 'q,
        I: IntoIterator<Item = &'q QueryRecord<Id>>,
    {
        let mut total = 0usize;
        let results: Vec<_> = queries
            .into_iter()
            .filter_map(|query| {
                total += 1;
                let result = self.resolve(query);
                if result.is_none() {
                    debug!(sentence = %query.sentence, "run: no match, skipping");
                }
                result
            })
            .collect();

        info!(matched = results.len(), total, "Matched queries against corpus");
        results
    }
}

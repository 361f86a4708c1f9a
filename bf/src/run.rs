//! Search query construction and update planning

use std::path::Path;

use corpusindex::{ContextResult, ContextWindow, CorpusIndex, MatchDriver};
use tracing::{debug, info, warn};

use crate::anki::{AnkiError, NoteId, NoteStore};
use crate::config::NotesConfig;
use crate::note::query_record;

/// Anki search for notes of the configured type, carrying `tag`, whose
/// context field is still empty
pub fn search_query(notes: &NotesConfig, tag: &str) -> String {
    format!("\"note:{}\" \"tag:{}\" \"{}:\"", notes.note_type, tag, notes.context_field)
}

/// Tag derived from the transcript file name, without extension
pub fn default_tag(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

/// Updates computed for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Notes returned by the search
    pub total_notes: usize,
    /// Context for every note whose sentence was found, in search order
    pub updates: Vec<ContextResult<NoteId>>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Find notes with `query` and compute their new context from `index`
pub async fn plan_updates<S>(
    store: &S,
    index: &CorpusIndex,
    query: &str,
    sentence_field: &str,
    window: ContextWindow,
) -> Result<Plan, AnkiError>
where
    S: NoteStore + ?Sized,
{
    info!(%query, "Querying notes");
    let note_ids = store.find_notes(query).await?;
    if note_ids.is_empty() {
        return Ok(Plan::default());
    }
    debug!(count = note_ids.len(), "plan_updates: fetching note info");

    let notes = store.notes_info(&note_ids).await?;
    let queries: Vec<_> = notes
        .iter()
        .filter_map(|note| {
            let record = query_record(note, sentence_field);
            if record.is_none() {
                warn!(note_id = note.note_id, %sentence_field, "Note has no such field, skipping");
            }
            record
        })
        .collect();

    let updates = MatchDriver::new(index, window).run(&queries);
    Ok(Plan {
        total_notes: notes.len(),
        updates,
    })
}

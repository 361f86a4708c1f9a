//! Note field parsing

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

use corpusindex::QueryRecord;

use crate::anki::NoteId;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid html tag regex"));

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<b>(.+?)</b>").expect("valid bold regex"));

/// A note as returned by AnkiConnect's `notesInfo`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    pub note_id: NoteId,
    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

impl NoteInfo {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|f| f.value.as_str())
    }
}

/// Remove every HTML tag, keeping the text between them
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Inner text of the first `<b>...</b>` element
pub fn bold_text(text: &str) -> Option<&str> {
    BOLD.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Build the query for a note from its sentence field.
///
/// Returns `None` when the note has no such field.
pub fn query_record(note: &NoteInfo, sentence_field: &str) -> Option<QueryRecord<NoteId>> {
    let raw = note.field(sentence_field)?;
    let record = QueryRecord::new(note.note_id, strip_html(raw));
    Some(match bold_text(raw) {
        Some(token) => record.with_emphasis(token),
        None => record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(sentence: &str) -> NoteInfo {
        serde_json::from_value(serde_json::json!({
            "noteId": 1502298033753i64,
            "modelName": "JP Mining Note",
            "tags": ["vn"],
            "fields": {
                "Sentence": {"value": sentence, "order": 0},
                "AdditionalNotes": {"value": "", "order": 1}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("彼は<b>猫</b>が<br>好き"), "彼は猫が好き");
        assert_eq!(strip_html("no tags"), "no tags");
    }

    #[test]
    fn test_bold_text_first_only() {
        assert_eq!(bold_text("a <b>one</b> b <b>two</b>"), Some("one"));
        assert_eq!(bold_text("<b></b>"), None);
        assert_eq!(bold_text("plain"), None);
    }

    #[test]
    fn test_query_record_with_bold() {
        let record = query_record(&note("彼は<b>猫</b>が好き"), "Sentence").unwrap();
        assert_eq!(record.identifier, 1502298033753);
        assert_eq!(record.sentence, "彼は猫が好き");
        assert_eq!(record.emphasis_token.as_deref(), Some("猫"));
    }

    #[test]
    fn test_query_record_without_bold() {
        let record = query_record(&note("彼は猫が好き"), "Sentence").unwrap();
        assert_eq!(record.emphasis_token, None);
    }

    #[test]
    fn test_query_record_missing_field() {
        assert!(query_record(&note("x"), "Expression").is_none());
    }
}

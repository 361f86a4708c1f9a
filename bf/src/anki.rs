//! AnkiConnect note store
//!
//! Talks to the AnkiConnect add-on over HTTP. Every request is a JSON object
//! `{action, version, params}`; every response is an envelope with exactly
//! two keys, `result` and `error`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use corpusindex::ContextResult;

use crate::config::AnkiConfig;
use crate::note::NoteInfo;

/// AnkiConnect API version spoken by this client
pub const API_VERSION: u32 = 6;

/// Anki note identifier
pub type NoteId = i64;

/// Errors that can occur while talking to AnkiConnect
#[derive(Debug, Error)]
pub enum AnkiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response has an unexpected number of fields: {0}")]
    UnexpectedFieldCount(usize),

    #[error("Response is missing required {0} field")]
    MissingField(&'static str),

    #[error("AnkiConnect error: {0}")]
    Api(String),
}

/// Source of notes to backfill and sink for their new context
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Ids of notes matching an Anki search query
    async fn find_notes(&self, query: &str) -> Result<Vec<NoteId>, AnkiError>;

    /// Field contents of the given notes
    async fn notes_info(&self, notes: &[NoteId]) -> Result<Vec<NoteInfo>, AnkiError>;

    /// Write each result's context into `field` of its note
    async fn update_fields(&self, field: &str, updates: &[ContextResult<NoteId>]) -> Result<(), AnkiError>;
}

/// HTTP client for the AnkiConnect add-on
pub struct AnkiConnect {
    url: String,
    http: Client,
}

impl AnkiConnect {
    pub fn from_config(config: &AnkiConfig) -> Result<Self, AnkiError> {
        debug!(?config, "from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            url: config.url.clone(),
            http,
        })
    }

    /// Run a single action and return its `result`
    pub async fn invoke(&self, action: &str, params: Value) -> Result<Value, AnkiError> {
        debug!(%action, url = %self.url, "invoke: called");
        let response: Value = self
            .http
            .post(&self.url)
            .json(&request_body(action, params))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        parse_response(response)
    }
}

#[async_trait]
impl NoteStore for AnkiConnect {
    async fn find_notes(&self, query: &str) -> Result<Vec<NoteId>, AnkiError> {
        let result = self.invoke("findNotes", json!({ "query": query })).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn notes_info(&self, notes: &[NoteId]) -> Result<Vec<NoteInfo>, AnkiError> {
        let result = self.invoke("notesInfo", json!({ "notes": notes })).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn update_fields(&self, field: &str, updates: &[ContextResult<NoteId>]) -> Result<(), AnkiError> {
        let actions: Vec<Value> = updates
            .iter()
            .map(|u| update_action(u.identifier, field, &u.context_text))
            .collect();
        let result = self.invoke("multi", json!({ "actions": actions })).await?;
        check_multi_result(&result)?;
        info!(count = updates.len(), %field, "Updated note fields");
        Ok(())
    }
}

fn request_body(action: &str, params: Value) -> Value {
    json!({
        "action": action,
        "version": API_VERSION,
        "params": params,
    })
}

/// `updateNoteFields` action setting one field of one note
pub fn update_action(note_id: NoteId, field: &str, context: &str) -> Value {
    json!({
        "action": "updateNoteFields",
        "version": API_VERSION,
        "params": {
            "note": {
                "id": note_id,
                "fields": { field: context },
            },
        },
    })
}

/// Validate a response envelope and unwrap its `result`
pub fn parse_response(response: Value) -> Result<Value, AnkiError> {
    let Value::Object(mut envelope) = response else {
        return Err(AnkiError::UnexpectedFieldCount(0));
    };
    if envelope.len() != 2 {
        return Err(AnkiError::UnexpectedFieldCount(envelope.len()));
    }
    let error = envelope.remove("error").ok_or(AnkiError::MissingField("error"))?;
    let result = envelope.remove("result").ok_or(AnkiError::MissingField("result"))?;

    match error {
        Value::Null => Ok(result),
        Value::String(message) => Err(AnkiError::Api(message)),
        other => Err(AnkiError::Api(other.to_string())),
    }
}

/// Fail if any sub-action of a `multi` call reported an error
fn check_multi_result(result: &Value) -> Result<(), AnkiError> {
    let Some(entries) = result.as_array() else {
        return Ok(());
    };
    let errors: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.get("error"))
        .filter(|error| !error.is_null())
        .map(|error| error.as_str().map(str::to_string).unwrap_or_else(|| error.to_string()))
        .collect();

    match errors.first() {
        None => Ok(()),
        Some(first) => Err(AnkiError::Api(format!(
            "{} of {} updates failed, first error: {}",
            errors.len(),
            entries.len(),
            first
        ))),
    }
}

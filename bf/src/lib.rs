//! Backfill - fill Anki note context fields from texthooker transcripts
//!
//! Loads a transcript (plain text or a texthooker-ui JSON export), finds
//! notes in Anki through AnkiConnect, locates each note's sentence in the
//! transcript with [`corpusindex`], and writes the surrounding lines back
//! into the note's context field after confirmation.
//!
//! # Modules
//!
//! - [`loader`] - Transcript file type detection and line loading
//! - [`note`] - Note field parsing into query records
//! - [`anki`] - NoteStore trait and AnkiConnect client
//! - [`run`] - Search query construction and update planning
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod anki;
pub mod cli;
pub mod config;
pub mod loader;
pub mod note;
pub mod run;

pub use anki::{AnkiConnect, AnkiError, NoteId, NoteStore};
pub use config::Config;
pub use loader::{FileType, LoadError, load_lines};
pub use note::{NoteInfo, query_record};
pub use run::{Plan, plan_updates, search_query};

//! CLI argument parsing for backfill

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::loader::FileType;

#[derive(Parser, Debug)]
#[command(name = "bf")]
#[command(
    author,
    version,
    about = "Backfill Anki note context fields from a transcript",
    long_about = None
)]
pub struct Cli {
    /// Transcript file (.txt, or .json exported from texthooker-ui)
    pub file: PathBuf,

    /// Lines of context before the matched line (like grep -B)
    #[arg(short = 'B', long)]
    pub context_before: Option<usize>,

    /// Lines of context from the matched line onwards (like grep -A)
    #[arg(short = 'A', long)]
    pub context_after: Option<usize>,

    /// Tag to select notes by (default: file name without extension)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Note type to select notes by
    #[arg(long)]
    pub note_type: Option<String>,

    /// Field that receives the context
    #[arg(long)]
    pub context_field: Option<String>,

    /// Field holding the sentence to locate
    #[arg(long)]
    pub sentence_field: Option<String>,

    /// Raw Anki search query, overrides note type, tag and field selection
    #[arg(short, long)]
    pub query: Option<String>,

    /// Transcript format (default: detect from file extension)
    #[arg(long, value_enum)]
    pub file_type: Option<FileType>,

    /// AnkiConnect URL
    #[arg(long)]
    pub anki_url: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Override config values with the flags given on the command line
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(before) = self.context_before {
            config.context.before = before;
        }
        if let Some(after) = self.context_after {
            config.context.after = after;
        }
        if let Some(note_type) = &self.note_type {
            config.notes.note_type = note_type.clone();
        }
        if let Some(field) = &self.context_field {
            config.notes.context_field = field.clone();
        }
        if let Some(field) = &self.sentence_field {
            config.notes.sentence_field = field.clone();
        }
        if let Some(url) = &self.anki_url {
            config.anki.url = url.clone();
        }
    }
}

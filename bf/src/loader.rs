//! Transcript loading
//!
//! Turns a transcript file into the ordered line list the corpus index is
//! built from.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a transcript
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid texthooker export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unable to automatically detect file type of {}. Please specify a valid --file-type", .0.display())]
    UnknownFileType(PathBuf),

    #[error("File type '{0}' is not supported yet")]
    Unsupported(FileType),
}

/// Supported transcript formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FileType {
    /// Plain text, one line per line
    Txt,
    /// EPUB book
    Epub,
    /// JSON export from Renji's texthooker-ui
    Renji,
}

impl FileType {
    /// Detect the format from the file extension
    pub fn detect(path: &Path) -> Result<Self, LoadError> {
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("txt") => Ok(Self::Txt),
            Some("epub") => Ok(Self::Epub),
            Some("json") => {
                debug!(path = %path.display(), "detect: json, expecting texthooker-ui export");
                Ok(Self::Renji)
            }
            _ => Err(LoadError::UnknownFileType(path.to_path_buf())),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Txt => "txt",
            Self::Epub => "epub",
            Self::Renji => "renji",
        };
        f.write_str(name)
    }
}

/// Texthooker-ui export layout; only the line text is used
#[derive(Debug, Deserialize)]
struct RenjiExport {
    #[serde(rename = "bannou-texthooker-lineData")]
    line_data: Vec<RenjiLine>,
}

#[derive(Debug, Deserialize)]
struct RenjiLine {
    text: String,
}

/// Load the transcript at `path` as an ordered list of lines
pub fn load_lines(path: &Path, file_type: FileType) -> Result<Vec<String>, LoadError> {
    let lines = match file_type {
        FileType::Txt => parse_txt(&read(path)?),
        FileType::Renji => parse_renji(&read(path)?)?,
        FileType::Epub => return Err(LoadError::Unsupported(file_type)),
    };
    debug!(path = %path.display(), %file_type, line_count = lines.len(), "Loaded transcript");
    Ok(lines)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-blank lines, kept verbatim
fn parse_txt(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_renji(content: &str) -> Result<Vec<String>, LoadError> {
    let export: RenjiExport = serde_json::from_str(content)?;
    Ok(export.line_data.into_iter().map(|l| l.text).collect())
}

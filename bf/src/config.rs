//! Backfill configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use corpusindex::ContextWindow;

/// Main backfill configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AnkiConnect connection
    pub anki: AnkiConfig,

    /// Note selection and field names
    pub notes: NotesConfig,

    /// Context window sizes
    pub context: ContextConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .backfill.yml
        let local_config = PathBuf::from(".backfill.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/backfill/backfill.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("backfill").join("backfill.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// AnkiConnect connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// AnkiConnect endpoint
    pub url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8765".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Which notes to backfill and which fields to read and write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    pub note_type: String,
    pub sentence_field: String,
    pub context_field: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            note_type: "JP Mining Note".to_string(),
            sentence_field: "Sentence".to_string(),
            context_field: "AdditionalNotes".to_string(),
        }
    }
}

/// Lines of context kept around each match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub before: usize,
    pub after: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            before: corpusindex::DEFAULT_CONTEXT_BEFORE,
            after: corpusindex::DEFAULT_CONTEXT_AFTER,
        }
    }
}

impl From<&ContextConfig> for ContextWindow {
    fn from(config: &ContextConfig) -> Self {
        ContextWindow::new(config.before, config.after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.anki.url, "http://localhost:8765");
        assert_eq!(config.notes.note_type, "JP Mining Note");
        assert_eq!(config.notes.context_field, "AdditionalNotes");
        assert_eq!(ContextWindow::from(&config.context), ContextWindow::new(15, 5));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("context:\n  before: 3\nnotes:\n  context_field: Context\n").unwrap();
        assert_eq!(config.context.before, 3);
        assert_eq!(config.context.after, 5);
        assert_eq!(config.notes.context_field, "Context");
        assert_eq!(config.notes.sentence_field, "Sentence");
        assert_eq!(config.anki, AnkiConfig::default());
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("backfill.yml");

        let mut config = Config::default();
        config.anki.url = "http://127.0.0.1:9999".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}

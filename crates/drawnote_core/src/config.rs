//! Runtime configuration for note persistence.
//!
//! # Responsibility
//! - Resolve the database file and storage key used by the note store.
//!
//! # Invariants
//! - Blank environment values fall back to defaults.
//! - A validated config never carries an empty key or path.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Storage key the note collection is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@draw_note_notes";
pub const DEFAULT_DB_FILE_NAME: &str = "drawnote.sqlite3";

pub const DB_PATH_ENV: &str = "DRAWNOTE_DB_PATH";
pub const STORAGE_KEY_ENV: &str = "DRAWNOTE_STORAGE_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyStorageKey,
    EmptyDbPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorageKey => write!(f, "storage key cannot be empty"),
            Self::EmptyDbPath => write!(f, "database path cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Where and under which key notes are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Builds a config from `DRAWNOTE_DB_PATH` / `DRAWNOTE_STORAGE_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = non_blank(lookup(DB_PATH_ENV)) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = non_blank(lookup(STORAGE_KEY_ENV)) {
            config.storage_key = key;
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DEFAULT_STORAGE_KEY, DB_PATH_ENV, STORAGE_KEY_ENV};
    use std::path::PathBuf;

    #[test]
    fn lookup_overrides_defaults_and_ignores_blank_values() {
        let config = StoreConfig::from_lookup(|name| match name {
            DB_PATH_ENV => Some(" /data/notes.db ".to_string()),
            STORAGE_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/data/notes.db"));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_fields() {
        let mut config = StoreConfig {
            storage_key: String::new(),
            ..StoreConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyStorageKey));

        config.storage_key = "k".to_string();
        config.db_path = PathBuf::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyDbPath));
    }
}

//! Domain error types

use thiserror::Error;

use crate::domain::keys::KeyComboParseError;

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

/// Error when a configured shortcut cannot be turned into a definition
#[derive(Debug, Clone, Error)]
#[error("Shortcut \"{id}\": {source}")]
pub struct InvalidShortcutError {
    pub id: String,
    #[source]
    pub source: KeyComboParseError,
}

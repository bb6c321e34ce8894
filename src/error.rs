use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the in-memory profile store.
///
/// The text analysis functions themselves never fail; only the store has
/// identity and lookup semantics that can go wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile not found: {id}")]
    NotFound { id: String },

    #[error("profile id already exists: {id}")]
    DuplicateId { id: String },

    #[error("cannot build a profile for '{topic}' without any scripts")]
    NoScripts { topic: String },
}

/// Errors raised while loading a `pitch-architect.toml` file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {message}")]
    Invalid { message: String },
}

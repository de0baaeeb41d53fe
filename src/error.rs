//! Error types for Student Desk

use thiserror::Error;

/// Result type alias for Student Desk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading the desk
///
/// Per-query outcomes never produce an error: empty or unrecognized queries
/// resolve to a decline or fallback response instead
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (empty lexicon, empty entry set, bad threshold)
    #[error("configuration error: {0}")]
    Config(String),

    /// Two knowledge entries share the same key
    #[error("duplicate knowledge entry: {0}")]
    DuplicateEntry(String),

    /// Knowledge file content is structurally invalid
    #[error("knowledge error: {0}")]
    Knowledge(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

// File: src/error.rs
//! Error types shared by the consolidation pipeline, the quiz engine and
//! score-log persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using VocabError.
pub type Result<T> = std::result::Result<T, VocabError>;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source file not found: {0}")]
    MissingSource(PathBuf),

    #[error("vocabulary store not found: {0}")]
    MissingStore(PathBuf),

    #[error("vocabulary store {0} contains no words")]
    EmptyVocabulary(PathBuf),

    #[error("question count must be between 1 and {available}, got {requested}")]
    InvalidCount { requested: usize, available: usize },

    #[error("quiz session is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: crate::core::session::SessionState,
        actual: crate::core::session::SessionState,
    },

    #[error("cancelled by user")]
    Cancelled,

    #[error("answer count {answers} does not match word count {words}")]
    AnswerCountMismatch { answers: usize, words: usize },

    #[error("cannot weight quiz words: {0}")]
    Weights(#[from] rand::distributions::WeightedError),

    #[error("duplicate source file: {0}")]
    DuplicateSource(PathBuf),

    #[error("binary log encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("JSON log encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl VocabError {
    /// Wraps an `io::Error` with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VocabError::Io {
            path: path.into(),
            source,
        }
    }
}

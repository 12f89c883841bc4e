//! Error types for locbase-store.

use std::path::PathBuf;

/// Result type for locbase-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in locbase-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create the directory holding a store file.
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization error (preference values).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The preference file exists but is not a JSON object of strings.
    #[error("Corrupt preference file {path}: {source}")]
    CorruptPreferences {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The blocking task running a database operation failed.
    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

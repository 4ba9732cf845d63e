// ABOUTME: Error types for the document store
// ABOUTME: IO, serialization, corruption and schema-version failures

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored document '{key}' is corrupted: {reason}")]
    Corrupted { key: String, reason: String },

    #[error("Stored data uses schema version {found}, this build supports up to {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("Income with ID '{0}' already exists")]
    DuplicateId(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

//! Error types for collection persistence

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error while reading or writing a record
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Record could not be serialized or deserialized
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

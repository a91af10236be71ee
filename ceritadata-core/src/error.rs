//! Core error types for ceritadata.

use thiserror::Error;

/// Core error type for ceritadata operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data from the backend did not match the expected shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

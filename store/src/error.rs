//! Storage error types.

use thiserror::Error;

/// Errors that can occur at the storage layer.
///
/// Connectivity loss and other backend faults propagate up as fatal errors
/// from whichever operation touched storage; there is no retry policy here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed to serve a read or write.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A stored record could not be encoded or decoded.
    #[error("Record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

//! Error types for snapshot store operations.

use thiserror::Error;

/// Errors that can occur during `JsonStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the task collection to JSON.
    #[error("Failed to serialize tasks: {0}")]
    Json(#[from] serde_json::Error),
}

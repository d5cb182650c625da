//! Error types for reminder delivery

use std::io;

/// Result type for delivery operations
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Errors that can occur while talking to the delivery command
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// No delivery command is configured, or delivery is switched off
    #[error("reminder delivery is not configured")]
    Unavailable,

    /// The delivery command finished with a non-zero exit code
    #[error("delivery command failed with exit code {code}: {stderr}")]
    Failed {
        /// Exit code from the delivery command
        code: i32,
        /// Standard error output
        stderr: String,
    },

    /// The delivery command did not finish in time
    #[error("delivery command timed out after {0} seconds")]
    Timeout(u64),

    /// The delivery command printed no reminder handle
    #[error("delivery command returned no reminder handle")]
    NoHandle,

    /// I/O error while running the command
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error for the payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

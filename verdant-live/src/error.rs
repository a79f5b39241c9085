//! Error types for the live runtime

use thiserror::Error;
use verdant::VerdantError;

/// Result type alias for live runtime operations
pub type Result<T> = std::result::Result<T, LiveError>;

/// Errors raised while loading configuration or running a view
#[derive(Error, Debug)]
pub enum LiveError {
    /// Core validation or state error
    #[error(transparent)]
    Verdant(#[from] VerdantError),

    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file or snapshot (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The scheduler task panicked or was cancelled
    #[error("Scheduler task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

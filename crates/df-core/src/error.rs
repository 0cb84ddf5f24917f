//! Error types for DrawForge

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("remaining pool is empty")]
    EmptyPool,

    #[error("roster is empty")]
    EmptyRoster,

    #[error("operation not allowed while a roll is in progress")]
    RollInProgress,

    #[error("roll token is stale or was canceled")]
    StaleRoll,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type DrawResult<T> = Result<T, DrawError>;

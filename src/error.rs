//! Lab Errors
//!
//! Error types surfaced by the compatibility lab. Generation itself never
//! fails; only explicit persistence operations report errors.

use thiserror::Error;

/// Errors returned by lab operations that write to storage
#[derive(Debug, Error)]
pub enum LabError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode stored record: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type LabResult<T> = std::result::Result<T, LabError>;

//! Shared error taxonomy for resource handlers

use thiserror::Error;

/// Errors a resource handler can return
///
/// Backends never terminate the process on failure; every backend error is
/// surfaced to the caller as one of these variants. The mock backend only
/// produces `NotFound` and `Conflict`.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Could not map provider response: {0}")]
    MappingFailure(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CloudError {
    /// True when the error means the target simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;

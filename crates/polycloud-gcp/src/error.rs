//! GCP provider error types

use polycloud_core::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcpError {
    #[error("gcloud not found. Please install the Google Cloud SDK")]
    GcloudNotFound,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    #[error("gcloud command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GcpError>;

/// Fold provider errors into the shared taxonomy
///
/// Name collisions surface as Conflict; everything transport-shaped becomes
/// BackendUnavailable.
impl From<GcpError> for CloudError {
    fn from(err: GcpError) -> Self {
        match err {
            GcpError::NotFound(name) => CloudError::NotFound(name),
            GcpError::AlreadyExists(name) => CloudError::Conflict(name),
            GcpError::JsonError(e) => CloudError::Json(e),
            other => CloudError::BackendUnavailable(other.to_string()),
        }
    }
}

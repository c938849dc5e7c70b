//! Project/region scope configuration

use crate::error::{GcpError, Result};
use serde::{Deserialize, Serialize};

/// Scope every GCP call runs under
///
/// Resource names are unique within one scope; two scopes with different
/// project/region pairs never collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpScope {
    pub project: String,
    pub region: String,
}

impl GcpScope {
    pub fn new(project: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            region: region.into(),
        }
    }

    /// Load scope from `POLYCLOUD_GCP_PROJECT` / `POLYCLOUD_GCP_REGION`
    pub fn from_env() -> Result<Self> {
        let project = std::env::var("POLYCLOUD_GCP_PROJECT")
            .map_err(|_| GcpError::MissingEnvVar("POLYCLOUD_GCP_PROJECT".to_string()))?;
        let region = std::env::var("POLYCLOUD_GCP_REGION")
            .map_err(|_| GcpError::MissingEnvVar("POLYCLOUD_GCP_REGION".to_string()))?;

        if project.is_empty() || region.is_empty() {
            return Err(GcpError::InvalidConfig(
                "project and region must be non-empty".to_string(),
            ));
        }

        Ok(Self { project, region })
    }
}

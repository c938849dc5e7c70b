//! GCP provider backend for polycloud
//!
//! Implements the polycloud handler traits against Google Compute Engine,
//! driving the `gcloud` CLI for the actual API calls. Raw responses are
//! mapped into the common data model; fields the model does not promote are
//! preserved as opaque key/value attributes.
//!
//! # Requirements
//!
//! - `gcloud` CLI must be installed and authenticated
//! - Project and region come from the [`GcpScope`], or from the
//!   `POLYCLOUD_GCP_PROJECT` / `POLYCLOUD_GCP_REGION` env vars
//!
//! # Example
//!
//! ```ignore
//! use polycloud_gcp::{GcpCloud, GcpScope};
//! use polycloud_core::{CloudConnection, PublicIpRequest};
//!
//! let cloud = GcpCloud::new(GcpScope::new("my-project", "us-central1"));
//! let ips = cloud.public_ip_handler();
//!
//! let info = ips.create(PublicIpRequest::new("edge-ip")).await?;
//! println!("allocated {}", info.address);
//! ```

pub mod client;
pub mod error;
mod mapping;
pub mod public_ip;
pub mod scope;
pub mod security;

pub use client::{ComputeClient, Gcloud};
pub use error::{GcpError, Result};
pub use public_ip::GcpPublicIpHandler;
pub use scope::GcpScope;
pub use security::GcpSecurityHandler;

use polycloud_core::{CloudConnection, PublicIpHandler, RetryConfig, SecurityHandler};
use std::sync::Arc;

/// One configured GCP driver scope
pub struct GcpCloud {
    scope: GcpScope,
    client: Arc<dyn ComputeClient>,
    retry: RetryConfig,
}

impl GcpCloud {
    /// Connect using the `gcloud` CLI client
    pub fn new(scope: GcpScope) -> Self {
        Self::with_client(scope, Arc::new(Gcloud::new()))
    }

    /// Connect with a caller-supplied compute client
    pub fn with_client(scope: GcpScope, client: Arc<dyn ComputeClient>) -> Self {
        Self {
            scope,
            client,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn scope(&self) -> &GcpScope {
        &self.scope
    }
}

impl CloudConnection for GcpCloud {
    fn provider_name(&self) -> &str {
        "gcp"
    }

    fn public_ip_handler(&self) -> Arc<dyn PublicIpHandler> {
        Arc::new(GcpPublicIpHandler::new(
            self.scope.clone(),
            self.client.clone(),
            self.retry.clone(),
        ))
    }

    fn security_handler(&self) -> Arc<dyn SecurityHandler> {
        Arc::new(GcpSecurityHandler::new(
            self.scope.clone(),
            self.client.clone(),
            self.retry.clone(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod testing;

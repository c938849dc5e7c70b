//! Resource handler trait definitions

use crate::error::Result;
use crate::model::{
    Listing, PublicIpInfo, PublicIpRequest, SecurityInfo, SecurityRequest,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Handler contract for public IP resources
///
/// Every backend (real provider or mock) implements exactly these four
/// operations. There is deliberately no update: mutation in this domain is
/// modeled as delete plus recreate.
#[async_trait]
pub trait PublicIpHandler: Send + Sync {
    /// Allocate a new address under the caller-chosen name.
    ///
    /// Fails with [`CloudError::Conflict`](crate::CloudError::Conflict) when
    /// the name already exists within the handler's scope.
    async fn create(&self, req: PublicIpRequest) -> Result<PublicIpInfo>;

    /// List every address visible to this scope.
    ///
    /// An empty scope yields an empty listing, never an error. The result is
    /// a defensive copy; mutating it cannot corrupt backend state.
    async fn list(&self) -> Result<Listing<PublicIpInfo>>;

    /// Fetch one address by name.
    async fn get(&self, name: &str) -> Result<PublicIpInfo>;

    /// Release an address by name.
    ///
    /// Returns `Ok(true)` when a matching resource existed and was removed,
    /// `Ok(false)` when nothing matched.
    async fn delete(&self, name: &str) -> Result<bool>;
}

/// Handler contract for security group resources
#[async_trait]
pub trait SecurityHandler: Send + Sync {
    async fn create(&self, req: SecurityRequest) -> Result<SecurityInfo>;

    async fn list(&self) -> Result<Listing<SecurityInfo>>;

    async fn get(&self, name: &str) -> Result<SecurityInfo>;

    async fn delete(&self, name: &str) -> Result<bool>;
}

/// One configured driver scope vending its resource handlers
///
/// A scope is a mock instance name, or project+region for a real provider.
/// Handlers from different scopes never observe each other's resources.
pub trait CloudConnection: Send + Sync {
    /// Provider name (e.g. "gcp", "mock")
    fn provider_name(&self) -> &str;

    fn public_ip_handler(&self) -> Arc<dyn PublicIpHandler>;

    fn security_handler(&self) -> Arc<dyn SecurityHandler>;
}

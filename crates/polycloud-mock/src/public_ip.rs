//! Mock public IP handler

use async_trait::async_trait;
use chrono::Utc;
use polycloud_core::{
    AddressType, CloudError, Listing, NetworkTier, PublicIpHandler, PublicIpInfo, PublicIpRequest,
    PublicIpStatus, ResourceId, Result,
};

use crate::registry::MockRegistry;

/// Mock implementation of the public IP handler contract
///
/// The system id is simply the caller-chosen name; the mock never models
/// id/name divergence. Addresses come from the TEST-NET-2 block so a leaked
/// value can never reach a real host.
pub struct MockPublicIpHandler {
    instance: String,
    registry: MockRegistry,
}

impl MockPublicIpHandler {
    pub fn new(instance: String, registry: MockRegistry) -> Self {
        Self { instance, registry }
    }
}

#[async_trait]
impl PublicIpHandler for MockPublicIpHandler {
    async fn create(&self, req: PublicIpRequest) -> Result<PublicIpInfo> {
        tracing::debug!(instance = %self.instance, name = %req.name, "mock: create public ip");

        let mut store = self.registry.lock();
        let seq = store.public_ips.entry(self.instance.clone()).or_default();

        if seq.iter().any(|info| info.id.name == req.name) {
            return Err(CloudError::Conflict(req.name));
        }

        let info = PublicIpInfo {
            id: ResourceId::new(req.name.clone(), req.name),
            region: "mock".to_string(),
            created_at: Some(Utc::now()),
            address: format!("198.51.100.{}", seq.len() + 1),
            network_tier: NetworkTier::Premium,
            address_type: AddressType::External,
            status: PublicIpStatus::Reserved,
            owner_instance: None,
            attributes: Vec::new(),
        };
        seq.push(info.clone());
        Ok(info)
    }

    async fn list(&self) -> Result<Listing<PublicIpInfo>> {
        tracing::debug!(instance = %self.instance, "mock: list public ips");

        let store = self.registry.lock();
        let items = store
            .public_ips
            .get(&self.instance)
            .cloned()
            .unwrap_or_default();
        Ok(Listing::new(items))
    }

    async fn get(&self, name: &str) -> Result<PublicIpInfo> {
        tracing::debug!(instance = %self.instance, name, "mock: get public ip");

        let store = self.registry.lock();
        store
            .public_ips
            .get(&self.instance)
            .and_then(|seq| seq.iter().find(|info| info.id.name == name))
            .cloned()
            .ok_or_else(|| CloudError::NotFound(name.to_string()))
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        tracing::debug!(instance = %self.instance, name, "mock: delete public ip");

        let mut store = self.registry.lock();
        let Some(seq) = store.public_ips.get_mut(&self.instance) else {
            return Ok(false);
        };
        match seq.iter().position(|info| info.id.name == name) {
            Some(idx) => {
                seq.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

//! Mock security group handler

use async_trait::async_trait;
use polycloud_core::{
    CloudError, Listing, ResourceId, Result, SecurityHandler, SecurityInfo, SecurityRequest,
};

use crate::registry::MockRegistry;

/// Mock implementation of the security group handler contract
pub struct MockSecurityHandler {
    instance: String,
    registry: MockRegistry,
}

impl MockSecurityHandler {
    pub fn new(instance: String, registry: MockRegistry) -> Self {
        Self { instance, registry }
    }
}

#[async_trait]
impl SecurityHandler for MockSecurityHandler {
    async fn create(&self, req: SecurityRequest) -> Result<SecurityInfo> {
        tracing::debug!(instance = %self.instance, name = %req.name, "mock: create security group");

        let mut store = self.registry.lock();
        let seq = store
            .security_groups
            .entry(self.instance.clone())
            .or_default();

        if seq.iter().any(|info| info.id.name == req.name) {
            return Err(CloudError::Conflict(req.name));
        }

        let info = SecurityInfo {
            id: ResourceId::new(req.name.clone(), req.name),
            vpc: req.vpc,
            direction: req.direction,
            rules: req.rules,
            attributes: Vec::new(),
        };
        seq.push(info.clone());
        Ok(info)
    }

    async fn list(&self) -> Result<Listing<SecurityInfo>> {
        tracing::debug!(instance = %self.instance, "mock: list security groups");

        let store = self.registry.lock();
        let items = store
            .security_groups
            .get(&self.instance)
            .cloned()
            .unwrap_or_default();
        Ok(Listing::new(items))
    }

    async fn get(&self, name: &str) -> Result<SecurityInfo> {
        tracing::debug!(instance = %self.instance, name, "mock: get security group");

        let store = self.registry.lock();
        store
            .security_groups
            .get(&self.instance)
            .and_then(|seq| seq.iter().find(|info| info.id.name == name))
            .cloned()
            .ok_or_else(|| CloudError::NotFound(name.to_string()))
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        tracing::debug!(instance = %self.instance, name, "mock: delete security group");

        let mut store = self.registry.lock();
        let Some(seq) = store.security_groups.get_mut(&self.instance) else {
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

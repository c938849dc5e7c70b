//! GCP security group handler
//!
//! Security groups map onto firewall rules. The rule bodies stay opaque to
//! this layer; only identity, owning network, and direction are promoted.

use async_trait::async_trait;
use polycloud_core::{
    CloudError, Listing, ResourceId, Result, RetryConfig, SecurityHandler, SecurityInfo,
    SecurityRequest,
};
use serde_json::Value;
use std::sync::Arc;

use crate::client::ComputeClient;
use crate::error::GcpError;
use crate::mapping::{opaque_attributes, render_id, require_str, trailing_segment};
use crate::scope::GcpScope;

/// Fields promoted into [`SecurityInfo`]; stripped from the opaque attributes
const PROMOTED: &[&str] = &["name", "id", "network", "direction", "allowed", "denied"];

pub struct GcpSecurityHandler {
    scope: GcpScope,
    client: Arc<dyn ComputeClient>,
    retry: RetryConfig,
}

impl GcpSecurityHandler {
    pub fn new(scope: GcpScope, client: Arc<dyn ComputeClient>, retry: RetryConfig) -> Self {
        Self {
            scope,
            client,
            retry,
        }
    }

    async fn wait_until_queryable(&self, name: &str) -> Result<SecurityInfo> {
        for attempt in 0..self.retry.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.retry.delay_for(attempt - 1)).await;
            }
            match self.get(name).await {
                Ok(info) => return Ok(info),
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }
        Err(CloudError::Timeout(format!(
            "firewall {name} not queryable after {} attempts",
            self.retry.max_attempts
        )))
    }
}

/// Map one raw firewall object into the common model
pub(crate) fn map_firewall(raw: &Value) -> Result<SecurityInfo> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CloudError::MappingFailure("firewall response is not an object".into()))?;

    let name = require_str(obj, "name", "firewall")?;
    let network = require_str(obj, "network", "firewall")?;
    let direction = require_str(obj, "direction", "firewall")?;

    let vpc_name = trailing_segment(network);

    // allowed/denied rule bodies pass through untouched
    let rules = obj
        .get("allowed")
        .or_else(|| obj.get("denied"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(SecurityInfo {
        id: ResourceId::new(name, render_id(obj, name)),
        vpc: ResourceId::new(vpc_name, vpc_name),
        direction: direction.to_string(),
        rules,
        attributes: opaque_attributes(obj, PROMOTED),
    })
}

#[async_trait]
impl SecurityHandler for GcpSecurityHandler {
    async fn create(&self, req: SecurityRequest) -> Result<SecurityInfo> {
        tracing::info!(name = %req.name, project = %self.scope.project, "gcp: create firewall");

        self.client
            .insert_firewall(&self.scope, &req.name, &req.vpc.name, &req.direction, &req.rules)
            .await
            .map_err(CloudError::from)?;

        self.wait_until_queryable(&req.name).await
    }

    async fn list(&self) -> Result<Listing<SecurityInfo>> {
        tracing::debug!(project = %self.scope.project, "gcp: list firewalls");

        let raw_items = self
            .client
            .list_firewalls(&self.scope)
            .await
            .map_err(CloudError::from)?;

        let mut listing = Listing::empty();
        for raw in &raw_items {
            match map_firewall(raw) {
                Ok(info) => listing.items.push(info),
                Err(e) => {
                    let name = raw
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("<unnamed>");
                    tracing::warn!(name, error = %e, "gcp: skipping unmappable firewall");
                    listing.omitted.push(format!("{name}: {e}"));
                }
            }
        }
        Ok(listing)
    }

    async fn get(&self, name: &str) -> Result<SecurityInfo> {
        tracing::debug!(name, "gcp: get firewall");

        let raw = self
            .client
            .get_firewall(&self.scope, name)
            .await
            .map_err(|e| match e {
                GcpError::NotFound(_) => CloudError::NotFound(name.to_string()),
                other => other.into(),
            })?;

        if raw.is_null() {
            return Err(CloudError::NotFound(name.to_string()));
        }
        map_firewall(&raw)
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        tracing::info!(name, "gcp: delete firewall");

        match self.client.delete_firewall(&self.scope, name).await {
            Ok(()) => Ok(true),
            Err(GcpError::NotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

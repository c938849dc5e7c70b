//! GCP public IP handler
//!
//! Addresses allocate asynchronously on the provider side, so `create` polls
//! `get` with bounded backoff until the address is queryable instead of
//! sleeping a fixed settle delay.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use polycloud_core::{
    AddressType, CloudError, Listing, NetworkTier, PublicIpHandler, PublicIpInfo, PublicIpRequest,
    PublicIpStatus, ResourceId, Result, RetryConfig,
};
use serde_json::Value;
use std::sync::Arc;

use crate::client::ComputeClient;
use crate::error::GcpError;
use crate::mapping::{opaque_attributes, render_id, require_str, trailing_segment};
use crate::scope::GcpScope;

/// Fields promoted into [`PublicIpInfo`]; stripped from the opaque attributes
const PROMOTED: &[&str] = &[
    "name",
    "id",
    "address",
    "status",
    "networkTier",
    "addressType",
    "region",
    "creationTimestamp",
    "users",
];

pub struct GcpPublicIpHandler {
    scope: GcpScope,
    client: Arc<dyn ComputeClient>,
    retry: RetryConfig,
}

impl GcpPublicIpHandler {
    pub fn new(scope: GcpScope, client: Arc<dyn ComputeClient>, retry: RetryConfig) -> Self {
        Self {
            scope,
            client,
            retry,
        }
    }

    /// Poll until the freshly inserted address is queryable
    async fn wait_until_queryable(&self, name: &str) -> Result<PublicIpInfo> {
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
            "address {name} not queryable after {} attempts",
            self.retry.max_attempts
        )))
    }
}

/// Map one raw address object into the common model
pub(crate) fn map_address(raw: &Value, scope: &GcpScope) -> Result<PublicIpInfo> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CloudError::MappingFailure("address response is not an object".into()))?;

    let name = require_str(obj, "name", "address")?;
    let address = require_str(obj, "address", "address")?;

    let status_str = require_str(obj, "status", "address")?;
    let status = PublicIpStatus::parse(status_str).ok_or_else(|| {
        CloudError::MappingFailure(format!("unknown address status `{status_str}`"))
    })?;

    // networkTier defaults to PREMIUM when the provider omits it
    let network_tier = match obj.get("networkTier").and_then(Value::as_str) {
        Some(tier) => NetworkTier::parse(tier).ok_or_else(|| {
            CloudError::MappingFailure(format!("unknown network tier `{tier}`"))
        })?,
        None => NetworkTier::Premium,
    };

    let address_type = obj
        .get("addressType")
        .and_then(Value::as_str)
        .map(AddressType::parse)
        .unwrap_or_default();

    let region = obj
        .get("region")
        .and_then(Value::as_str)
        .map(trailing_segment)
        .unwrap_or(&scope.region)
        .to_string();

    let created_at = match obj.get("creationTimestamp").and_then(Value::as_str) {
        Some(ts) => Some(
            DateTime::parse_from_rfc3339(ts)
                .map_err(|e| {
                    CloudError::MappingFailure(format!("bad creationTimestamp `{ts}`: {e}"))
                })?
                .with_timezone(&Utc),
        ),
        None => None,
    };

    // users[0] is a reference path to the attached instance
    let owner_instance = obj
        .get("users")
        .and_then(Value::as_array)
        .and_then(|users| users.first())
        .and_then(Value::as_str)
        .map(|path| {
            let vm = trailing_segment(path);
            ResourceId::new(vm, vm)
        });

    Ok(PublicIpInfo {
        id: ResourceId::new(name, render_id(obj, name)),
        region,
        created_at,
        address: address.to_string(),
        network_tier,
        address_type,
        status,
        owner_instance,
        attributes: opaque_attributes(obj, PROMOTED),
    })
}

#[async_trait]
impl PublicIpHandler for GcpPublicIpHandler {
    async fn create(&self, req: PublicIpRequest) -> Result<PublicIpInfo> {
        tracing::info!(name = %req.name, project = %self.scope.project, region = %self.scope.region, "gcp: create address");

        self.client
            .insert_address(&self.scope, &req.name)
            .await
            .map_err(CloudError::from)?;

        self.wait_until_queryable(&req.name).await
    }

    async fn list(&self) -> Result<Listing<PublicIpInfo>> {
        tracing::debug!(project = %self.scope.project, region = %self.scope.region, "gcp: list addresses");

        let raw_items = self
            .client
            .list_addresses(&self.scope)
            .await
            .map_err(CloudError::from)?;

        let mut listing = Listing::empty();
        for raw in &raw_items {
            match map_address(raw, &self.scope) {
                Ok(info) => listing.items.push(info),
                Err(e) => {
                    let name = raw
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("<unnamed>");
                    tracing::warn!(name, error = %e, "gcp: skipping unmappable address");
                    listing.omitted.push(format!("{name}: {e}"));
                }
            }
        }
        Ok(listing)
    }

    async fn get(&self, name: &str) -> Result<PublicIpInfo> {
        tracing::debug!(name, "gcp: get address");

        let raw = self
            .client
            .get_address(&self.scope, name)
            .await
            .map_err(|e| match e {
                GcpError::NotFound(_) => CloudError::NotFound(name.to_string()),
                other => other.into(),
            })?;

        if raw.is_null() {
            return Err(CloudError::NotFound(name.to_string()));
        }
        map_address(&raw, &self.scope)
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        tracing::info!(name, "gcp: delete address");

        match self.client.delete_address(&self.scope, name).await {
            Ok(()) => Ok(true),
            Err(GcpError::NotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

//! In-memory stub of the compute client for handler tests

use crate::error::{GcpError, Result};
use crate::scope::GcpScope;
use async_trait::async_trait;
use polycloud_core::RetryConfig;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

use crate::client::ComputeClient;

/// Canned compute backend
///
/// Inserts store a canned raw object; tests can also push raw objects
/// directly to exercise the mapping paths.
#[derive(Default)]
pub(crate) struct StubCompute {
    addresses: Mutex<Vec<Value>>,
    firewalls: Mutex<Vec<Value>>,
    /// When set, inserts succeed but the resource never becomes queryable
    invisible_after_insert: bool,
}

impl StubCompute {
    pub fn invisible() -> Self {
        Self {
            invisible_after_insert: true,
            ..Self::default()
        }
    }

    pub fn push_address(&self, raw: Value) {
        self.addresses.lock().unwrap().push(raw);
    }

    pub fn push_firewall(&self, raw: Value) {
        self.firewalls.lock().unwrap().push(raw);
    }
}

fn name_of(raw: &Value) -> Option<&str> {
    raw.get("name").and_then(Value::as_str)
}

fn find(seq: &[Value], name: &str) -> Option<Value> {
    seq.iter().find(|raw| name_of(raw) == Some(name)).cloned()
}

pub(crate) fn canned_address(name: &str) -> Value {
    json!({
        "kind": "compute#address",
        "id": "7241008851234567890",
        "creationTimestamp": "2026-05-01T10:00:00.000-07:00",
        "name": name,
        "address": "34.66.10.21",
        "status": "RESERVED",
        "region": "https://www.googleapis.com/compute/v1/projects/proj/regions/us-central1",
        "networkTier": "PREMIUM",
        "addressType": "EXTERNAL",
        "selfLink": format!("https://www.googleapis.com/compute/v1/projects/proj/regions/us-central1/addresses/{name}"),
    })
}

pub(crate) fn canned_firewall(name: &str, network: &str, direction: &str, rules: &[Value]) -> Value {
    json!({
        "kind": "compute#firewall",
        "id": "94218831234567890",
        "name": name,
        "network": format!("https://www.googleapis.com/compute/v1/projects/proj/global/networks/{network}"),
        "direction": direction,
        "allowed": rules,
        "priority": 1000,
        "selfLink": format!("https://www.googleapis.com/compute/v1/projects/proj/global/firewalls/{name}"),
    })
}

/// Millisecond-scale retry bounds so timeout paths stay fast
pub(crate) fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        backoff_multiplier: 2.0,
    }
}

#[async_trait]
impl ComputeClient for StubCompute {
    async fn insert_address(&self, _scope: &GcpScope, name: &str) -> Result<()> {
        let mut seq = self.addresses.lock().unwrap();
        if find(&seq, name).is_some() {
            return Err(GcpError::AlreadyExists(name.to_string()));
        }
        if !self.invisible_after_insert {
            seq.push(canned_address(name));
        }
        Ok(())
    }

    async fn get_address(&self, _scope: &GcpScope, name: &str) -> Result<Value> {
        find(&self.addresses.lock().unwrap(), name)
            .ok_or_else(|| GcpError::NotFound(name.to_string()))
    }

    async fn list_addresses(&self, _scope: &GcpScope) -> Result<Vec<Value>> {
        Ok(self.addresses.lock().unwrap().clone())
    }

    async fn delete_address(&self, _scope: &GcpScope, name: &str) -> Result<()> {
        let mut seq = self.addresses.lock().unwrap();
        match seq.iter().position(|raw| name_of(raw) == Some(name)) {
            Some(idx) => {
                seq.remove(idx);
                Ok(())
            }
            None => Err(GcpError::NotFound(name.to_string())),
        }
    }

    async fn insert_firewall(
        &self,
        _scope: &GcpScope,
        name: &str,
        network: &str,
        direction: &str,
        rules: &[Value],
    ) -> Result<()> {
        let mut seq = self.firewalls.lock().unwrap();
        if find(&seq, name).is_some() {
            return Err(GcpError::AlreadyExists(name.to_string()));
        }
        if !self.invisible_after_insert {
            seq.push(canned_firewall(name, network, direction, rules));
        }
        Ok(())
    }

    async fn get_firewall(&self, _scope: &GcpScope, name: &str) -> Result<Value> {
        find(&self.firewalls.lock().unwrap(), name)
            .ok_or_else(|| GcpError::NotFound(name.to_string()))
    }

    async fn list_firewalls(&self, _scope: &GcpScope) -> Result<Vec<Value>> {
        Ok(self.firewalls.lock().unwrap().clone())
    }

    async fn delete_firewall(&self, _scope: &GcpScope, name: &str) -> Result<()> {
        let mut seq = self.firewalls.lock().unwrap();
        match seq.iter().position(|raw| name_of(raw) == Some(name)) {
            Some(idx) => {
                seq.remove(idx);
                Ok(())
            }
            None => Err(GcpError::NotFound(name.to_string())),
        }
    }
}

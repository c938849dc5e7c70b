//! Mock registry and connection
//!
//! One [`MockRegistry`] owns all mock state, keyed by instance name. The
//! registry replaces the process-wide map a naive mock would use: tests hold
//! their own registry, so there is no hidden shared state between unrelated
//! suites.

use polycloud_core::{CloudConnection, PublicIpHandler, PublicIpInfo, SecurityHandler, SecurityInfo};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::public_ip::MockPublicIpHandler;
use crate::security::MockSecurityHandler;

/// Per-registry mock state
///
/// Ordered sequences per instance name; removal preserves the order of the
/// remaining records.
#[derive(Debug, Default)]
pub(crate) struct Store {
    pub public_ips: HashMap<String, Vec<PublicIpInfo>>,
    pub security_groups: HashMap<String, Vec<SecurityInfo>>,
}

/// Shared handle to one mock store
///
/// Cloning the registry shares the store; [`MockRegistry::connect`] scopes a
/// connection to one instance name within it.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    inner: Arc<Mutex<Store>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a connection scoped to `instance`
    pub fn connect(&self, instance: impl Into<String>) -> MockCloud {
        MockCloud {
            instance: instance.into(),
            registry: self.clone(),
        }
    }

    /// Exclusive access to the store; held across each read-modify-write
    pub(crate) fn lock(&self) -> MutexGuard<'_, Store> {
        // A poisoned lock only means a panic mid-operation elsewhere; the
        // store itself stays structurally valid.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// One mock driver scope
pub struct MockCloud {
    instance: String,
    registry: MockRegistry,
}

impl MockCloud {
    /// Fresh registry with a single connection scoped to `instance`
    pub fn new(instance: impl Into<String>) -> Self {
        MockRegistry::new().connect(instance)
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl CloudConnection for MockCloud {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn public_ip_handler(&self) -> Arc<dyn PublicIpHandler> {
        Arc::new(MockPublicIpHandler::new(
            self.instance.clone(),
            self.registry.clone(),
        ))
    }

    fn security_handler(&self) -> Arc<dyn SecurityHandler> {
        Arc::new(MockSecurityHandler::new(
            self.instance.clone(),
            self.registry.clone(),
        ))
    }
}

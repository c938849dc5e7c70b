//! Provider-neutral resource model
//!
//! Every backend maps its native representation into these types. Fields a
//! provider reports beyond the typed portion are preserved as opaque
//! [`KeyValue`](crate::keyvalue::KeyValue) attributes, never duplicated with
//! the typed fields.

use crate::keyvalue::KeyValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a managed resource
///
/// `name` is caller-chosen at creation; `system_id` is backend-assigned and
/// immutable afterwards. Uniqueness is scoped per driver instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceId {
    pub name: String,
    pub system_id: String,
}

impl ResourceId {
    pub fn new(name: impl Into<String>, system_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_id: system_id.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.system_id.is_empty()
    }
}

/// Network service tier of a public IP address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkTier {
    Premium,
    Standard,
}

impl NetworkTier {
    /// Parse the provider wire form (`PREMIUM`, `STANDARD`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PREMIUM" => Some(NetworkTier::Premium),
            "STANDARD" => Some(NetworkTier::Standard),
            _ => None,
        }
    }
}

/// Address type of a public IP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    External,
    Internal,
    #[default]
    Unspecified,
}

impl AddressType {
    /// Parse the provider wire form; unknown values fold to `Unspecified`
    pub fn parse(s: &str) -> Self {
        match s {
            "EXTERNAL" => AddressType::External,
            "INTERNAL" => AddressType::Internal,
            _ => AddressType::Unspecified,
        }
    }
}

/// Allocation status of a public IP, as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicIpStatus {
    InUse,
    Reserved,
    Reserving,
}

impl PublicIpStatus {
    /// Parse the provider wire form (`IN_USE`, `RESERVED`, `RESERVING`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IN_USE" => Some(PublicIpStatus::InUse),
            "RESERVED" => Some(PublicIpStatus::Reserved),
            "RESERVING" => Some(PublicIpStatus::Reserving),
            _ => None,
        }
    }
}

impl std::fmt::Display for PublicIpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicIpStatus::InUse => write!(f, "IN_USE"),
            PublicIpStatus::Reserved => write!(f, "RESERVED"),
            PublicIpStatus::Reserving => write!(f, "RESERVING"),
        }
    }
}

/// A public IP address resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicIpInfo {
    pub id: ResourceId,

    /// Region the address was allocated in
    pub region: String,

    /// Backend-reported creation time
    pub created_at: Option<DateTime<Utc>>,

    /// The address literal
    pub address: String,

    pub network_tier: NetworkTier,

    pub address_type: AddressType,

    /// Status at query time; reflects backend truth, never mutated locally
    pub status: PublicIpStatus,

    /// Identity of the attached instance, when the address is in use
    pub owner_instance: Option<ResourceId>,

    /// Provider fields not promoted into the typed portion
    pub attributes: Vec<KeyValue>,
}

/// Request to allocate a public IP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicIpRequest {
    /// Caller-chosen name, unique within the driver scope
    pub name: String,
}

impl PublicIpRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A security group resource
///
/// Rules are opaque at this layer; each entry is the provider's raw rule
/// representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityInfo {
    pub id: ResourceId,

    /// Identity of the owning network
    pub vpc: ResourceId,

    /// Traffic direction (e.g. "inbound", "INGRESS")
    pub direction: String,

    pub rules: Vec<serde_json::Value>,

    pub attributes: Vec<KeyValue>,
}

/// Request to create a security group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityRequest {
    pub name: String,
    pub vpc: ResourceId,
    pub direction: String,
    pub rules: Vec<serde_json::Value>,
}

/// Result of a List operation
///
/// `items` is always a defensive copy of backend state. A per-item mapping
/// failure does not abort the listing; the item is skipped and described in
/// `omitted`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub omitted: Vec<String>,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            omitted: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            omitted: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

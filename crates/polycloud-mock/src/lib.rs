//! In-memory mock backend for polycloud
//!
//! Implements the polycloud handler traits against a per-registry in-memory
//! store, for deterministic tests without network calls or credentials.
//!
//! State is scoped by instance name: handlers connected under different names
//! never observe each other's resources, which substitutes for per-test
//! fixtures. The store lives for the registry's lifetime only and is never
//! persisted.
//!
//! # Example
//!
//! ```ignore
//! use polycloud_mock::MockCloud;
//! use polycloud_core::{CloudConnection, PublicIpRequest};
//!
//! let cloud = MockCloud::new("test-01");
//! let ips = cloud.public_ip_handler();
//!
//! let info = ips.create(PublicIpRequest::new("ip-1")).await?;
//! assert_eq!(info.id.name, "ip-1");
//! ```

pub mod public_ip;
pub mod registry;
pub mod security;

pub use public_ip::MockPublicIpHandler;
pub use registry::{MockCloud, MockRegistry};
pub use security::MockSecurityHandler;

//! Polycloud core abstraction
//!
//! This crate defines the provider-agnostic resource handler contract for
//! polycloud: every backend (a real cloud provider or the in-memory mock)
//! exposes the same four operations per resource kind, and returns the same
//! provider-neutral data model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              orchestration / callers             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               polycloud-core                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │        Handler Abstraction               │   │
//! │  │  trait PublicIpHandler { ... }           │   │
//! │  │  trait SecurityHandler { ... }           │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Common Model │  │  Normalizer  │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │  gcp backend  │ │  mock backend │
//! └───────────────┘ └───────────────┘
//! ```

pub mod error;
pub mod handler;
pub mod keyvalue;
pub mod model;
pub mod retry;

// Re-exports
pub use error::{CloudError, Result};
pub use handler::{CloudConnection, PublicIpHandler, SecurityHandler};
pub use keyvalue::{flatten, flatten_value, KeyValue};
pub use model::{
    AddressType, Listing, NetworkTier, PublicIpInfo, PublicIpRequest, PublicIpStatus, ResourceId,
    SecurityInfo, SecurityRequest,
};
pub use retry::RetryConfig;

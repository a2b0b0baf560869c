//! Cloudmap Sync - service discovery cache and registry janitor.
//!
//! Keeps a multi-cluster reconciler's view of the service registry close
//! at hand without hammering the registry on every pass.
//!
//! ## Architecture
//!
//! - `cache` - bounded, per-class TTL cache of namespaces, service ids and endpoints
//! - `registry` - cache-first lookups against the registry
//! - `janitor` - asynchronous deletion of namespaces and services
//! - `model` - namespace and endpoint types
//! - `config` - environment configuration
//! - `logging` - tracing subscriber setup

pub mod cache;
pub mod config;
pub mod janitor;
pub mod logging;
pub mod model;
pub mod registry;

pub use cache::{CacheConfig, SdCache, ServiceDiscoveryClientCache};
pub use config::{Config, ConfigError};
pub use janitor::{Janitor, JanitorApi, JanitorError, ServiceDiscoveryJanitorApi};
pub use registry::{RegistryResolver, ServiceDiscoveryClient};

//! Cache module - read-through cache in front of the service registry.
//!
//! ## Architecture
//!
//! - `ExpiringStore` - bounded LRU store over Moka with a TTL on every entry
//! - `key` - collision-free keys per entity class (`ns`, `svc`, `endpt`)
//! - `CachedValue` - payload tagged with its entity class
//! - `guard` - evicts entries whose payload doesn't match their key class
//! - `SdCache` - the [`ServiceDiscoveryClientCache`] facade
//!
//! ## Usage
//!
//! ```rust
//! use cloudmap_sync::cache::{CacheConfig, SdCache, ServiceDiscoveryClientCache};
//!
//! let cache = SdCache::new(CacheConfig::default());
//!
//! cache.cache_nil_namespace("ghost");
//! assert_eq!(cache.get_namespace("ghost"), Some(None));
//! assert_eq!(cache.get_namespace("unknown"), None);
//! ```

mod client_cache;
mod clock;
mod config;
mod guard;
pub mod key;
mod store;
mod value;

pub use client_cache::{SdCache, ServiceDiscoveryClientCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    CacheConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_ENDPOINT_TTL, DEFAULT_NAMESPACE_TTL,
    DEFAULT_SERVICE_TTL, MAX_TTL,
};
pub use guard::ShapeMismatch;
pub use key::{CacheKey, KeyClass};
pub use store::ExpiringStore;
pub use value::CachedValue;

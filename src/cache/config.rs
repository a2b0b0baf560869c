//! Cache configuration.

use std::time::Duration;

/// Default maximum number of entries across all entity classes.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;
/// Default time-to-live for namespace entries.
pub const DEFAULT_NAMESPACE_TTL: Duration = Duration::from_secs(120);
/// Default time-to-live for service id entries.
pub const DEFAULT_SERVICE_TTL: Duration = Duration::from_secs(120);
/// Default time-to-live for endpoint set entries.
pub const DEFAULT_ENDPOINT_TTL: Duration = Duration::from_secs(5);
/// Longest TTL the store accepts; longer ones are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Configuration for the service discovery cache.
///
/// All entity classes share one capacity bound; each class gets its own TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries in the shared store.
    pub max_capacity: u64,

    /// Time-to-live for namespace entries, including negative ones.
    pub namespace_ttl: Duration,

    /// Time-to-live for service id entries.
    pub service_ttl: Duration,

    /// Time-to-live for endpoint sets.
    /// Kept short since stale endpoints misroute traffic.
    pub endpoint_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: DEFAULT_CACHE_CAPACITY,
            namespace_ttl: DEFAULT_NAMESPACE_TTL, // 2 minutes
            service_ttl: DEFAULT_SERVICE_TTL,     // 2 minutes
            endpoint_ttl: DEFAULT_ENDPOINT_TTL,   // 5 seconds
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given max capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set max capacity for the cache (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set time-to-live for namespace entries.
    #[must_use]
    pub fn namespace_ttl(mut self, duration: Duration) -> Self {
        self.namespace_ttl = duration;
        self
    }

    /// Set time-to-live for service id entries.
    #[must_use]
    pub fn service_ttl(mut self, duration: Duration) -> Self {
        self.service_ttl = duration;
        self
    }

    /// Set time-to-live for endpoint sets.
    #[must_use]
    pub fn endpoint_ttl(mut self, duration: Duration) -> Self {
        self.endpoint_ttl = duration;
        self
    }
}

//! Service discovery client cache.
//!
//! Namespaces, service ids and endpoint sets share one expiring store and
//! one capacity bound, each class with its own TTL.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::guard::checked_get;
use super::key::{CacheKey, endpoints_key, namespace_key, service_key};
use super::store::ExpiringStore;
use super::value::CachedValue;
use super::CacheConfig;
use crate::model::{Endpoint, Namespace};

/// Cache consulted by the reconciliation loop before the registry.
///
/// Each call is independent: there is no atomicity across entity classes.
pub trait ServiceDiscoveryClientCache: Send + Sync {
    /// Look up a namespace by name.
    ///
    /// - `None`: never looked up or expired, resolve from the registry
    /// - `Some(None)`: confirmed absent, do not query the registry again
    /// - `Some(Some(ns))`: cached namespace
    fn get_namespace(&self, ns_name: &str) -> Option<Option<Namespace>>;

    /// Cache a resolved namespace under its name.
    fn cache_namespace(&self, namespace: &Namespace);

    /// Record that `ns_name` does not exist in the registry.
    fn cache_nil_namespace(&self, ns_name: &str);

    fn get_service_id(&self, ns_name: &str, svc_name: &str) -> Option<String>;

    fn cache_service_id(&self, ns_name: &str, svc_name: &str, svc_id: &str);

    fn get_endpoints(&self, ns_name: &str, svc_name: &str) -> Option<Arc<[Endpoint]>>;

    fn cache_endpoints(&self, ns_name: &str, svc_name: &str, endpoints: Vec<Endpoint>);

    /// Drop the endpoint set ahead of its TTL, e.g. on an observed change.
    fn evict_endpoints(&self, ns_name: &str, svc_name: &str);
}

/// [`ServiceDiscoveryClientCache`] over a single [`ExpiringStore`].
#[derive(Clone, Debug)]
pub struct SdCache {
    store: ExpiringStore<CacheKey, CachedValue>,
    config: CacheConfig,
}

impl SdCache {
    /// Create a cache with explicit TTLs and capacity.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a cache whose expiry is driven by `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let store = ExpiringStore::with_clock("cloudmap", config.max_capacity, clock);
        Self { store, config }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn put(&self, key: CacheKey, value: CachedValue, ttl: Duration) {
        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "Caching {}", value.class());
        self.store.add(key, value, ttl);
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &ExpiringStore<CacheKey, CachedValue> {
        &self.store
    }
}

impl Default for SdCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl ServiceDiscoveryClientCache for SdCache {
    fn get_namespace(&self, ns_name: &str) -> Option<Option<Namespace>> {
        let key = namespace_key(ns_name);
        let cached = checked_get(&self.store, &key, CachedValue::into_namespace);

        match &cached {
            Some(Some(_)) => debug!(ns = ns_name, "Namespace cache hit"),
            Some(None) => debug!(ns = ns_name, "Namespace cache hit (not found)"),
            None => debug!(ns = ns_name, "Namespace cache miss"),
        }

        cached
    }

    fn cache_namespace(&self, namespace: &Namespace) {
        self.put(
            namespace_key(&namespace.name),
            CachedValue::Namespace(Some(namespace.clone())),
            self.config.namespace_ttl,
        );
    }

    fn cache_nil_namespace(&self, ns_name: &str) {
        self.put(
            namespace_key(ns_name),
            CachedValue::Namespace(None),
            self.config.namespace_ttl,
        );
    }

    fn get_service_id(&self, ns_name: &str, svc_name: &str) -> Option<String> {
        let key = service_key(ns_name, svc_name);
        let cached = checked_get(&self.store, &key, CachedValue::into_service_id);

        if cached.is_some() {
            debug!(ns = ns_name, svc = svc_name, "Service id cache hit");
        } else {
            debug!(ns = ns_name, svc = svc_name, "Service id cache miss");
        }

        cached
    }

    fn cache_service_id(&self, ns_name: &str, svc_name: &str, svc_id: &str) {
        self.put(
            service_key(ns_name, svc_name),
            CachedValue::ServiceId(svc_id.to_string()),
            self.config.service_ttl,
        );
    }

    fn get_endpoints(&self, ns_name: &str, svc_name: &str) -> Option<Arc<[Endpoint]>> {
        let key = endpoints_key(ns_name, svc_name);
        let cached = checked_get(&self.store, &key, CachedValue::into_endpoints);

        if cached.is_some() {
            debug!(ns = ns_name, svc = svc_name, "Endpoints cache hit");
        } else {
            debug!(ns = ns_name, svc = svc_name, "Endpoints cache miss");
        }

        cached
    }

    fn cache_endpoints(&self, ns_name: &str, svc_name: &str, endpoints: Vec<Endpoint>) {
        self.put(
            endpoints_key(ns_name, svc_name),
            CachedValue::Endpoints(endpoints.into()),
            self.config.endpoint_ttl,
        );
    }

    fn evict_endpoints(&self, ns_name: &str, svc_name: &str) {
        debug!(ns = ns_name, svc = svc_name, "Evicting endpoints");
        self.store.remove(&endpoints_key(ns_name, svc_name));
    }
}

//! Service discovery client with cache-first lookups.
//!
//! Lookup order follows the registry hierarchy: namespace, then service id,
//! then endpoints. Each level is cached independently.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::RegistryResolver;
use crate::cache::ServiceDiscoveryClientCache;
use crate::model::{Endpoint, Namespace};

/// Resolves namespaces, services and endpoints, consulting the cache first.
#[derive(Clone)]
pub struct ServiceDiscoveryClient {
    resolver: Arc<dyn RegistryResolver>,
    cache: Arc<dyn ServiceDiscoveryClientCache>,
}

impl ServiceDiscoveryClient {
    pub fn new(
        resolver: Arc<dyn RegistryResolver>,
        cache: Arc<dyn ServiceDiscoveryClientCache>,
    ) -> Self {
        Self { resolver, cache }
    }

    /// Get a namespace by name.
    ///
    /// A namespace the registry doesn't know is cached as absent, so repeated
    /// lookups don't reach the registry until the entry expires.
    pub async fn namespace(&self, ns_name: &str) -> Result<Option<Namespace>> {
        if let Some(cached) = self.cache.get_namespace(ns_name) {
            return Ok(cached);
        }

        let resolved = self.resolver.get_namespace(ns_name).await?;

        match &resolved {
            Some(namespace) => self.cache.cache_namespace(namespace),
            None => {
                debug!(ns = ns_name, "Namespace not found in registry");
                self.cache.cache_nil_namespace(ns_name);
            }
        }

        Ok(resolved)
    }

    /// Get the registry id for a service.
    ///
    /// Missing services are not cached: they are expected to appear soon.
    pub async fn service_id(&self, ns_name: &str, svc_name: &str) -> Result<Option<String>> {
        if let Some(svc_id) = self.cache.get_service_id(ns_name, svc_name) {
            return Ok(Some(svc_id));
        }

        let Some(namespace) = self.namespace(ns_name).await? else {
            return Ok(None);
        };

        let svc_id = self.resolver.get_service_id(&namespace, svc_name).await?;

        if let Some(id) = &svc_id {
            self.cache.cache_service_id(ns_name, svc_name, id);
        }

        Ok(svc_id)
    }

    /// List endpoints for a service, empty if the service doesn't exist.
    pub async fn endpoints(&self, ns_name: &str, svc_name: &str) -> Result<Arc<[Endpoint]>> {
        if let Some(endpoints) = self.cache.get_endpoints(ns_name, svc_name) {
            return Ok(endpoints);
        }

        let Some(svc_id) = self.service_id(ns_name, svc_name).await? else {
            return Ok(Arc::from(Vec::new()));
        };

        let endpoints = self.resolver.list_endpoints(ns_name, &svc_id).await?;
        debug!(ns = ns_name, svc = svc_name, count = endpoints.len(), "Resolved endpoints");

        self.cache.cache_endpoints(ns_name, svc_name, endpoints.clone());

        Ok(endpoints.into())
    }

    /// Invalidate cached endpoints after observing a membership change.
    pub fn endpoints_changed(&self, ns_name: &str, svc_name: &str) {
        self.cache.evict_endpoints(ns_name, svc_name);
    }
}

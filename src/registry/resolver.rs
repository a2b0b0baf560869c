//! Remote registry lookups.

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{Endpoint, Namespace};

/// Authoritative lookups against the service registry.
///
/// Implementations wrap the registry SDK and own retries and timeouts.
#[async_trait]
pub trait RegistryResolver: Send + Sync {
    /// Find a namespace by name, `None` if the registry has no such namespace.
    async fn get_namespace(&self, ns_name: &str) -> Result<Option<Namespace>>;

    /// Find the id of `svc_name` within `namespace`.
    async fn get_service_id(&self, namespace: &Namespace, svc_name: &str) -> Result<Option<String>>;

    /// List the endpoints registered for a service, in registry order.
    async fn list_endpoints(&self, ns_name: &str, svc_id: &str) -> Result<Vec<Endpoint>>;
}

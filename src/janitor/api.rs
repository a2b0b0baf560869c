//! Registry deletion API over the SDK facade.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{JanitorError, OperationStatus, SdkJanitorFacade, ServiceSummary};
use crate::model::Namespace;

/// Registry calls the janitor needs, with typed errors.
#[async_trait]
pub trait JanitorApi: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, JanitorError>;

    async fn list_services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>, JanitorError>;

    /// Request deletion of a namespace, returning the operation id to poll.
    async fn delete_namespace(&self, namespace_id: &str) -> Result<String, JanitorError>;

    async fn delete_service(&self, service_id: &str) -> Result<(), JanitorError>;

    async fn get_operation(&self, operation_id: &str) -> Result<OperationStatus, JanitorError>;
}

/// [`JanitorApi`] backed by the registry SDK facade.
#[derive(Clone)]
pub struct ServiceDiscoveryJanitorApi {
    facade: Arc<dyn SdkJanitorFacade>,
}

impl ServiceDiscoveryJanitorApi {
    pub fn new(facade: Arc<dyn SdkJanitorFacade>) -> Self {
        Self { facade }
    }
}

#[async_trait]
impl JanitorApi for ServiceDiscoveryJanitorApi {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>, JanitorError> {
        self.facade
            .list_namespaces()
            .await
            .map_err(JanitorError::sdk("list namespaces"))
    }

    async fn list_services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>, JanitorError> {
        self.facade
            .list_services(namespace_id)
            .await
            .map_err(JanitorError::sdk("list services"))
    }

    async fn delete_namespace(&self, namespace_id: &str) -> Result<String, JanitorError> {
        let output = self
            .facade
            .delete_namespace(namespace_id)
            .await
            .map_err(JanitorError::sdk("delete namespace"))?;

        let operation_id = output.operation_id.ok_or_else(|| JanitorError::MissingOperationId {
            namespace_id: namespace_id.to_string(),
        })?;

        info!(namespace_id, operation_id = %operation_id, "Namespace deletion requested");
        Ok(operation_id)
    }

    async fn delete_service(&self, service_id: &str) -> Result<(), JanitorError> {
        self.facade
            .delete_service(service_id)
            .await
            .map_err(JanitorError::sdk("delete service"))?;

        info!(service_id, "Service deleted");
        Ok(())
    }

    async fn get_operation(&self, operation_id: &str) -> Result<OperationStatus, JanitorError> {
        self.facade
            .get_operation(operation_id)
            .await
            .map_err(JanitorError::sdk("get operation"))
    }
}

impl std::fmt::Debug for ServiceDiscoveryJanitorApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDiscoveryJanitorApi").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::janitor::mock::MockFacade;

    #[tokio::test]
    async fn test_delete_namespace_returns_operation_id() {
        let facade = Arc::new(MockFacade::with_namespace("demo", &[]));
        let api = ServiceDiscoveryJanitorApi::new(facade.clone());

        let operation_id = api.delete_namespace("ns-demo").await.unwrap();

        assert_eq!(operation_id, "op-ns-demo");
        assert_eq!(facade.calls(), vec!["delete_namespace:ns-demo"]);
    }

    #[tokio::test]
    async fn test_delete_namespace_without_operation_id() {
        let facade = MockFacade::with_namespace("demo", &[]).without_operation_id();
        let api = ServiceDiscoveryJanitorApi::new(Arc::new(facade));

        let err = api.delete_namespace("ns-demo").await.unwrap_err();

        assert!(matches!(err, JanitorError::MissingOperationId { .. }));
    }

    #[tokio::test]
    async fn test_delete_service() {
        let facade = Arc::new(MockFacade::with_namespace("demo", &["web"]));
        let api = ServiceDiscoveryJanitorApi::new(facade.clone());

        api.delete_service("srv-web").await.unwrap();

        assert_eq!(facade.calls(), vec!["delete_service:srv-web"]);
    }

    #[tokio::test]
    async fn test_sdk_failure_keeps_cause() {
        let facade = Arc::new(MockFacade::with_namespace("demo", &[]));
        facade.fail_on("delete_namespace");
        let api = ServiceDiscoveryJanitorApi::new(facade);

        let err = api.delete_namespace("ns-demo").await.unwrap_err();

        assert_eq!(err.to_string(), "failed to delete namespace");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "delete_namespace rejected");
    }
}

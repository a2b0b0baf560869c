//! Registry SDK surface used by the janitor.

use anyhow::Result;
use async_trait::async_trait;

use crate::model::Namespace;

/// A service as listed by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub id: String,
    pub name: String,
}

impl ServiceSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Response to a namespace deletion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteNamespaceOutput {
    pub operation_id: Option<String>,
}

/// State of an asynchronous registry operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Submitted,
    Pending,
    Success,
    /// Failed, with the registry's reason
    Fail(String),
}

impl OperationStatus {
    /// Map a raw registry status and optional error message.
    pub fn from_registry(status: &str, error_message: Option<&str>) -> Self {
        match status {
            "SUCCESS" => Self::Success,
            "FAIL" => Self::Fail(error_message.unwrap_or("unknown error").to_string()),
            "PENDING" => Self::Pending,
            _ => Self::Submitted,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Fail(_))
    }
}

/// Calls into the registry SDK needed for cleanup.
#[async_trait]
pub trait SdkJanitorFacade: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>>;

    async fn list_services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>>;

    async fn delete_namespace(&self, namespace_id: &str) -> Result<DeleteNamespaceOutput>;

    async fn delete_service(&self, service_id: &str) -> Result<()>;

    async fn get_operation(&self, operation_id: &str) -> Result<OperationStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_from_registry() {
        assert_eq!(OperationStatus::from_registry("SUCCESS", None), OperationStatus::Success);
        assert_eq!(
            OperationStatus::from_registry("FAIL", Some("namespace not empty")),
            OperationStatus::Fail("namespace not empty".to_string())
        );
        assert_eq!(OperationStatus::from_registry("PENDING", None), OperationStatus::Pending);
        assert!(!OperationStatus::from_registry("SUBMITTED", None).is_terminal());
    }
}

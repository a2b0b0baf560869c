//! Namespace cleanup.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{JanitorApi, JanitorError, OperationStatus};

/// Default wait between operation status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default number of polls before giving up on an operation.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 30;

/// How long cleanup waits on asynchronous registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JanitorConfig {
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }
}

/// Outcome of a successful cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupReport {
    /// The namespace wasn't in the registry.
    NothingToDo,
    Deleted {
        namespace_id: String,
        services_deleted: usize,
        operation_id: String,
    },
}

/// Removes a namespace and every service in it from the registry.
#[derive(Clone)]
pub struct Janitor {
    api: Arc<dyn JanitorApi>,
    config: JanitorConfig,
}

impl Janitor {
    pub fn new(api: Arc<dyn JanitorApi>, config: JanitorConfig) -> Self {
        Self { api, config }
    }

    /// Delete all services in `ns_name`, then the namespace itself, and wait
    /// for the namespace deletion to complete.
    pub async fn cleanup(&self, ns_name: &str) -> Result<CleanupReport, JanitorError> {
        let namespaces = self.api.list_namespaces().await?;
        let Some(namespace) = namespaces.into_iter().find(|ns| ns.name == ns_name) else {
            info!(ns = ns_name, "Namespace not found, nothing to clean up");
            return Ok(CleanupReport::NothingToDo);
        };

        let services = self.api.list_services(&namespace.id).await?;
        for service in &services {
            if let Err(e) = self.api.delete_service(&service.id).await {
                warn!(ns = ns_name, svc = %service.name, "Failed to delete service: {}", e);
                return Err(e);
            }
        }

        let operation_id = self.api.delete_namespace(&namespace.id).await?;
        self.wait_for_operation(&operation_id).await?;

        info!(
            ns = ns_name,
            services = services.len(),
            "Namespace cleanup complete"
        );

        Ok(CleanupReport::Deleted {
            namespace_id: namespace.id,
            services_deleted: services.len(),
            operation_id,
        })
    }

    async fn wait_for_operation(&self, operation_id: &str) -> Result<(), JanitorError> {
        for attempt in 1..=self.config.poll_attempts {
            match self.api.get_operation(operation_id).await? {
                OperationStatus::Success => return Ok(()),
                OperationStatus::Fail(reason) => {
                    return Err(JanitorError::OperationFailed {
                        operation_id: operation_id.to_string(),
                        reason,
                    });
                }
                status => {
                    info!(operation_id, attempt, ?status, "Waiting for operation");
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }

        Err(JanitorError::OperationTimedOut {
            operation_id: operation_id.to_string(),
            attempts: self.config.poll_attempts,
        })
    }
}

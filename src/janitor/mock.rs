//! In-memory SDK facade for janitor tests.

use std::collections::VecDeque;

use anyhow::{Result, bail};
use async_trait::async_trait;
use parking_lot::Mutex;

use super::{DeleteNamespaceOutput, OperationStatus, SdkJanitorFacade, ServiceSummary};
use crate::model::{Namespace, NamespaceType};

#[derive(Default)]
pub(crate) struct MockFacade {
    namespaces: Vec<Namespace>,
    services: Vec<ServiceSummary>,
    statuses: Mutex<VecDeque<OperationStatus>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<Option<&'static str>>,
    omit_operation_id: bool,
}

impl MockFacade {
    /// One namespace `ns-{name}` holding services `srv-{svc}`.
    pub(crate) fn with_namespace(name: &str, services: &[&str]) -> Self {
        Self {
            namespaces: vec![Namespace::new(
                format!("ns-{name}"),
                name,
                NamespaceType::HttpNamespace,
            )],
            services: services
                .iter()
                .map(|svc| ServiceSummary::new(format!("srv-{svc}"), *svc))
                .collect(),
            ..Default::default()
        }
    }

    pub(crate) fn without_operation_id(mut self) -> Self {
        self.omit_operation_id = true;
        self
    }

    pub(crate) fn push_statuses(&self, statuses: impl IntoIterator<Item = OperationStatus>) {
        self.statuses.lock().extend(statuses);
    }

    pub(crate) fn fail_on(&self, call: &'static str) {
        *self.failing.lock() = Some(call);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &'static str, arg: Option<&str>) -> Result<()> {
        let entry = match arg {
            Some(arg) => format!("{call}:{arg}"),
            None => call.to_string(),
        };
        self.calls.lock().push(entry);

        if *self.failing.lock() == Some(call) {
            bail!("{call} rejected");
        }
        Ok(())
    }
}

#[async_trait]
impl SdkJanitorFacade for MockFacade {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        self.record("list_namespaces", None)?;
        Ok(self.namespaces.clone())
    }

    async fn list_services(&self, namespace_id: &str) -> Result<Vec<ServiceSummary>> {
        self.record("list_services", Some(namespace_id))?;
        Ok(self.services.clone())
    }

    async fn delete_namespace(&self, namespace_id: &str) -> Result<DeleteNamespaceOutput> {
        self.record("delete_namespace", Some(namespace_id))?;
        let operation_id = (!self.omit_operation_id).then(|| format!("op-{namespace_id}"));
        Ok(DeleteNamespaceOutput { operation_id })
    }

    async fn delete_service(&self, service_id: &str) -> Result<()> {
        self.record("delete_service", Some(service_id))
    }

    async fn get_operation(&self, operation_id: &str) -> Result<OperationStatus> {
        self.record("get_operation", Some(operation_id))?;
        Ok(self
            .statuses
            .lock()
            .pop_front()
            .unwrap_or(OperationStatus::Submitted))
    }
}

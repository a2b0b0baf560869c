//! Janitor - deletes synced namespaces and services from the registry.
//!
//! Deletions are asynchronous on the registry side: namespace deletion
//! returns an operation id that is polled until it settles. The janitor
//! never touches the cache; callers invalidate whatever they hold.

mod api;
mod cleanup;
mod error;
mod facade;
#[cfg(test)]
mod mock;

pub use api::{JanitorApi, ServiceDiscoveryJanitorApi};
pub use cleanup::{CleanupReport, Janitor, JanitorConfig};
pub use error::JanitorError;
pub use facade::{DeleteNamespaceOutput, OperationStatus, SdkJanitorFacade, ServiceSummary};

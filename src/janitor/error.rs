//! Janitor errors.

/// Errors returned by the janitor.
#[derive(Debug, thiserror::Error)]
pub enum JanitorError {
    /// The registry SDK call itself failed.
    #[error("failed to {action}")]
    Sdk {
        action: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("no operation id returned for deletion of namespace {namespace_id}")]
    MissingOperationId { namespace_id: String },

    #[error("operation {operation_id} failed: {reason}")]
    OperationFailed { operation_id: String, reason: String },

    #[error("operation {operation_id} did not complete after {attempts} polls")]
    OperationTimedOut { operation_id: String, attempts: u32 },
}

impl JanitorError {
    pub(crate) fn sdk(action: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Sdk { action, source }
    }
}

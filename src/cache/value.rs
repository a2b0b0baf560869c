//! Values held by the shared store.

use std::sync::Arc;

use super::guard::ShapeMismatch;
use super::key::KeyClass;
use crate::model::{Endpoint, Namespace};

/// A cached payload tagged with the entity class it was written for.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    /// `None` records a namespace confirmed absent in the registry.
    Namespace(Option<Namespace>),
    ServiceId(String),
    Endpoints(Arc<[Endpoint]>),
}

impl CachedValue {
    /// Entity class of this payload.
    pub fn class(&self) -> KeyClass {
        match self {
            Self::Namespace(_) => KeyClass::Namespace,
            Self::ServiceId(_) => KeyClass::ServiceId,
            Self::Endpoints(_) => KeyClass::Endpoints,
        }
    }

    pub(crate) fn into_namespace(self) -> Result<Option<Namespace>, ShapeMismatch> {
        match self {
            Self::Namespace(ns) => Ok(ns),
            other => Err(ShapeMismatch::new(KeyClass::Namespace, other.class())),
        }
    }

    pub(crate) fn into_service_id(self) -> Result<String, ShapeMismatch> {
        match self {
            Self::ServiceId(id) => Ok(id),
            other => Err(ShapeMismatch::new(KeyClass::ServiceId, other.class())),
        }
    }

    pub(crate) fn into_endpoints(self) -> Result<Arc<[Endpoint]>, ShapeMismatch> {
        match self {
            Self::Endpoints(endpoints) => Ok(endpoints),
            other => Err(ShapeMismatch::new(KeyClass::Endpoints, other.class())),
        }
    }
}

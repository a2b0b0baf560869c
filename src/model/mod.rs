//! Service discovery models shared by the cache, resolver and janitor.

mod endpoint;
mod namespace;

pub use endpoint::{Endpoint, Port, ServiceType};
pub use namespace::{Namespace, NamespaceType};

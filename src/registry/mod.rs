//! Registry access - read-through lookups backed by the cache.

mod client;
mod resolver;

pub use client::ServiceDiscoveryClient;
pub use resolver::RegistryResolver;

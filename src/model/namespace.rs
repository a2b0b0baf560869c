//! Namespace model.

use serde::{Deserialize, Serialize};

/// Kind of registry namespace.
///
/// Only HTTP and private DNS namespaces can hold synced services; anything
/// else the registry reports is kept as `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamespaceType {
    #[serde(rename = "HTTP")]
    HttpNamespace,
    #[serde(rename = "DNS_PRIVATE")]
    DnsPrivateNamespace,
    #[serde(other)]
    Unsupported,
}

impl NamespaceType {
    /// Map a raw registry namespace type string.
    pub fn from_registry(raw: &str) -> Self {
        match raw {
            "HTTP" => Self::HttpNamespace,
            "DNS_PRIVATE" => Self::DnsPrivateNamespace,
            _ => Self::Unsupported,
        }
    }
}

/// A namespace resolved from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Registry-assigned identifier
    pub id: String,
    /// Namespace name, matching the cluster namespace
    pub name: String,
    pub namespace_type: NamespaceType,
}

impl Namespace {
    pub fn new(id: impl Into<String>, name: impl Into<String>, namespace_type: NamespaceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            namespace_type,
        }
    }

    /// Whether services can be registered in this namespace.
    pub fn is_supported(&self) -> bool {
        self.namespace_type != NamespaceType::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_type_from_registry() {
        assert_eq!(NamespaceType::from_registry("HTTP"), NamespaceType::HttpNamespace);
        assert_eq!(
            NamespaceType::from_registry("DNS_PRIVATE"),
            NamespaceType::DnsPrivateNamespace
        );
        assert_eq!(NamespaceType::from_registry("DNS_PUBLIC"), NamespaceType::Unsupported);
    }

    #[test]
    fn test_registry_type_strings_deserialize() {
        let ns: Namespace = serde_json::from_str(
            r#"{"id":"ns-123","name":"demo","namespace_type":"HTTP"}"#,
        )
        .unwrap();

        assert_eq!(ns.namespace_type, NamespaceType::HttpNamespace);
        assert!(ns.is_supported());
        assert_eq!(
            serde_json::to_string(&NamespaceType::DnsPrivateNamespace).unwrap(),
            r#""DNS_PRIVATE""#
        );
    }

    #[test]
    fn test_unknown_type_deserializes_as_unsupported() {
        let ns: Namespace = serde_json::from_str(
            r#"{"id":"ns-123","name":"demo","namespace_type":"DNS_PUBLIC"}"#,
        )
        .unwrap();

        assert_eq!(ns.namespace_type, NamespaceType::Unsupported);
        assert!(!ns.is_supported());
    }
}

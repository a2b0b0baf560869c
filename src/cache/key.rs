//! Cache key construction.
//!
//! Every entity class owns a disjoint prefix, and identifiers are escaped so
//! the delimiter inside a name can never make two keys of one class collide.

use std::borrow::Cow;
use std::fmt;

const NAMESPACE_PREFIX: &str = "ns";
const SERVICE_PREFIX: &str = "svc";
const ENDPOINTS_PREFIX: &str = "endpt";
const DELIMITER: char = ':';

/// Entity class a cache key (or cached value) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    Namespace,
    ServiceId,
    Endpoints,
}

impl KeyClass {
    /// Key prefix owned by this class.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Namespace => NAMESPACE_PREFIX,
            Self::ServiceId => SERVICE_PREFIX,
            Self::Endpoints => ENDPOINTS_PREFIX,
        }
    }
}

impl fmt::Display for KeyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Namespace => "namespace",
            Self::ServiceId => "service id",
            Self::Endpoints => "endpoints",
        };
        f.write_str(name)
    }
}

/// A key into the shared service discovery store.
///
/// Only constructible through [`namespace_key`], [`service_key`] and
/// [`endpoints_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    class: KeyClass,
    raw: String,
}

impl CacheKey {
    fn build(class: KeyClass, parts: &[&str]) -> Self {
        let mut raw = String::from(class.prefix());
        for part in parts {
            raw.push(DELIMITER);
            raw.push_str(&escape(part));
        }
        Self { class, raw }
    }

    /// Entity class this key was built for.
    pub fn class(&self) -> KeyClass {
        self.class
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Key for a namespace lookup.
pub fn namespace_key(ns_name: &str) -> CacheKey {
    CacheKey::build(KeyClass::Namespace, &[ns_name])
}

/// Key for the service id of `svc_name` in `ns_name`.
pub fn service_key(ns_name: &str, svc_name: &str) -> CacheKey {
    CacheKey::build(KeyClass::ServiceId, &[ns_name, svc_name])
}

/// Key for the endpoint set of `svc_name` in `ns_name`.
pub fn endpoints_key(ns_name: &str, svc_name: &str) -> CacheKey {
    CacheKey::build(KeyClass::Endpoints, &[ns_name, svc_name])
}

/// Percent-escape `%` and the delimiter.
fn escape(part: &str) -> Cow<'_, str> {
    if !part.contains(['%', DELIMITER]) {
        return Cow::Borrowed(part);
    }

    let mut escaped = String::with_capacity(part.len() + 4);
    for c in part.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            DELIMITER => escaped.push_str("%3A"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(namespace_key("demo").as_str(), "ns:demo");
        assert_eq!(service_key("demo", "web").as_str(), "svc:demo:web");
        assert_eq!(endpoints_key("demo", "web").as_str(), "endpt:demo:web");
    }

    #[test]
    fn test_classes_never_collide() {
        assert_ne!(service_key("demo", "web"), endpoints_key("demo", "web"));
        assert_ne!(namespace_key("svc:demo"), service_key("demo", ""));
        assert_eq!(endpoints_key("a", "b").class(), KeyClass::Endpoints);
    }

    #[test]
    fn test_delimiter_in_names_is_escaped() {
        // Without escaping both would be "svc:a:b:c".
        let left = service_key("a:b", "c");
        let right = service_key("a", "b:c");

        assert_ne!(left, right);
        assert_eq!(left.as_str(), "svc:a%3Ab:c");
        assert_eq!(right.as_str(), "svc:a:b%3Ac");
    }

    #[test]
    fn test_escape_is_injective_with_literal_percent() {
        assert_ne!(namespace_key("a%3Ab"), namespace_key("a:b"));
        assert_eq!(namespace_key("a%3Ab").as_str(), "ns:a%253Ab");
    }
}

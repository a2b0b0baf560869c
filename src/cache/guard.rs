//! Shape checks on cache reads.
//!
//! A payload whose class doesn't match the key it was read from is treated
//! as corruption: logged, evicted and reported as a miss.

use tracing::error;

use super::key::{CacheKey, KeyClass};
use super::store::ExpiringStore;
use super::value::CachedValue;

/// A cached payload of the wrong entity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected} payload, found {found}")]
pub struct ShapeMismatch {
    pub expected: KeyClass,
    pub found: KeyClass,
}

impl ShapeMismatch {
    pub(crate) fn new(expected: KeyClass, found: KeyClass) -> Self {
        Self { expected, found }
    }
}

/// Read `key` and convert its payload with `extract`.
///
/// Returns `None` on a miss, or after evicting an entry that fails `extract`.
pub(crate) fn checked_get<T>(
    store: &ExpiringStore<CacheKey, CachedValue>,
    key: &CacheKey,
    extract: impl FnOnce(CachedValue) -> Result<T, ShapeMismatch>,
) -> Option<T> {
    let value = store.get(key)?;

    match extract(value) {
        Ok(payload) => Some(payload),
        Err(mismatch) => {
            error!(
                key = %key,
                expected = %mismatch.expected,
                found = %mismatch.found,
                "Failed to retrieve {} from cache, evicting entry",
                mismatch.expected
            );
            store.remove(key);
            None
        }
    }
}

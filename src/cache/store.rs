//! Keyed expiring store built on Moka.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::ops::compute::Op;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use tracing::warn;

use super::clock::{Clock, SystemClock};
use super::config::MAX_TTL;

/// A stored value with the TTL it was written with.
#[derive(Debug, Clone)]
struct StoreEntry<V> {
    value: V,
    ttl: Duration,
    /// Absolute expiry taken from the store's clock at write time
    expires_at: Instant,
}

/// Per-entry expiry for Moka's own timer: every write restarts the entry's TTL.
struct EntryTtl;

impl<K, V> Expiry<K, StoreEntry<V>> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &K,
        entry: &StoreEntry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &K,
        entry: &StoreEntry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// A bounded, thread-safe store with a TTL on every entry.
///
/// This store is:
/// - Thread-safe: each `get`/`add`/`remove` is atomic, sequences are not
/// - Strict LRU when full, regardless of remaining TTL
/// - Clone-friendly (cloning is cheap, shares the same underlying cache)
///
/// Expiry is checked against the injected [`Clock`] on every read, so an
/// entry past its deadline is a miss even before Moka reclaims it.
pub struct ExpiringStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Cache<K, StoreEntry<V>>>,
    clock: Arc<dyn Clock>,
    name: Arc<str>,
}

// Clones share the underlying cache, clock and name
impl<K, V> Clone for ExpiringStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            clock: Arc::clone(&self.clock),
            name: Arc::clone(&self.name),
        }
    }
}

impl<K, V> ExpiringStore<K, V>
where
    K: Clone + Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a store holding at most `max_capacity` entries, on the system clock.
    pub fn new(name: impl Into<Arc<str>>, max_capacity: u64) -> Self {
        Self::with_clock(name, max_capacity, Arc::new(SystemClock))
    }

    /// Create a store that stamps and checks expiry with `clock`.
    pub fn with_clock(name: impl Into<Arc<str>>, max_capacity: u64, clock: Arc<dyn Clock>) -> Self {
        let name = name.into();
        let inner = Cache::builder()
            .name(&name)
            .max_capacity(max_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .expire_after(EntryTtl)
            .build();

        Self {
            inner: Arc::new(inner),
            clock,
            name,
        }
    }

    /// Get the name of this store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key was never written, was removed or evicted,
    /// or its TTL has elapsed. An expired entry is removed so it stops
    /// holding a slot.
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.inner.get(key)?;

        if self.clock.now() >= entry.expires_at {
            self.remove_expired(key);
            return None;
        }

        Some(entry.value)
    }

    /// Remove `key` only if the entry stored now is itself expired, so a
    /// concurrent replacement survives.
    fn remove_expired(&self, key: &K) {
        let now = self.clock.now();
        let _ = self.inner.entry_by_ref(key).and_compute_with(|current| match current {
            Some(entry) if now >= entry.value().expires_at => Op::Remove,
            _ => Op::Nop,
        });
    }

    /// Insert or replace `key` with a value that lives for `ttl`.
    ///
    /// The capacity bound is enforced before this returns, evicting the
    /// least recently used entries if needed. TTLs above [`MAX_TTL`] are
    /// clamped.
    pub fn add(&self, key: K, value: V, ttl: Duration) {
        if ttl > MAX_TTL {
            warn!(store = %self.name, ttl_secs = ttl.as_secs(), "TTL too large, clamping");
        }
        let ttl = ttl.min(MAX_TTL);
        let now = self.clock.now();

        // An unrepresentable deadline degrades to an immediate miss.
        let entry = StoreEntry {
            value,
            ttl,
            expires_at: now.checked_add(ttl).unwrap_or(now),
        };

        self.inner.insert(key, entry);
        self.inner.run_pending_tasks();
    }

    /// Remove a key from the store.
    pub fn remove(&self, key: &K) {
        self.inner.invalidate(key);
    }

    /// Get the number of entries in the store.
    ///
    /// Note: This may not be perfectly accurate due to concurrent operations.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl<K, V> std::fmt::Debug for ExpiringStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringStore")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    const TTL: Duration = Duration::from_secs(60);

    fn store(capacity: u64) -> (ExpiringStore<String, u32>, ManualClock) {
        let clock = ManualClock::new();
        let store = ExpiringStore::with_clock("test", capacity, Arc::new(clock.clone()));
        (store, clock)
    }

    #[test]
    fn test_get_missing_key() {
        let (store, _) = store(10);
        assert_eq!(store.get(&"nope".to_string()), None);
    }

    #[test]
    fn test_add_replaces_value_and_ttl() {
        let (store, clock) = store(10);
        let key = "k".to_string();

        store.add(key.clone(), 1, Duration::from_secs(1));
        store.add(key.clone(), 2, TTL);
        clock.advance(Duration::from_secs(2));

        assert_eq!(store.get(&key), Some(2));
    }

    #[test]
    fn test_remove() {
        let (store, _) = store(10);
        let key = "k".to_string();

        store.add(key.clone(), 1, TTL);
        store.remove(&key);

        assert_eq!(store.get(&key), None);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let (store, clock) = store(10);
        let key = "k".to_string();

        store.add(key.clone(), 1, Duration::from_secs(1));
        clock.advance(Duration::from_millis(999));
        assert_eq!(store.get(&key), Some(1));

        clock.advance(Duration::from_millis(1));
        assert_eq!(store.get(&key), None);
    }

    #[test]
    fn test_lru_eviction_respects_reads() {
        let (store, _) = store(2);

        store.add("a".to_string(), 1, TTL);
        store.add("b".to_string(), 2, TTL);
        // Touch "a" so "b" becomes least recently used
        assert_eq!(store.get(&"a".to_string()), Some(1));
        store.add("c".to_string(), 3, TTL);

        assert_eq!(store.get(&"b".to_string()), None);
        assert_eq!(store.get(&"a".to_string()), Some(1));
        assert_eq!(store.get(&"c".to_string()), Some(3));
        assert_eq!(store.entry_count(), 2);
    }

    #[test]
    fn test_expired_read_frees_its_slot() {
        let (store, clock) = store(10);
        let key = "k".to_string();

        store.add(key.clone(), 1, Duration::from_secs(1));
        clock.advance(Duration::from_secs(2));

        assert_eq!(store.get(&key), None);
        assert_eq!(store.entry_count(), 0);
    }

    #[test]
    fn test_expired_entry_does_not_evict_live_one() {
        let (store, clock) = store(2);

        store.add("short".to_string(), 1, Duration::from_secs(1));
        store.add("live".to_string(), 2, Duration::from_secs(600));
        clock.advance(Duration::from_secs(2));

        assert_eq!(store.get(&"short".to_string()), None);
        store.add("new".to_string(), 3, TTL);

        assert_eq!(store.get(&"live".to_string()), Some(2));
        assert_eq!(store.get(&"new".to_string()), Some(3));
        assert_eq!(store.entry_count(), 2);
    }

    #[test]
    fn test_oversized_ttl_is_clamped() {
        let (store, clock) = store(10);
        let key = "k".to_string();

        store.add(key.clone(), 1, Duration::MAX);
        assert_eq!(store.get(&key), Some(1));

        clock.advance(MAX_TTL);
        assert_eq!(store.get(&key), None);
    }
}

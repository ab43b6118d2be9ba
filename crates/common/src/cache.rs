//! Bounded response cache with TTL expiry and LRU eviction
//!
//! Backs the opt-in "cached request" utility: callers key a fetch by a
//! string and reuse the previous result while it is fresh. Entries past
//! the TTL are treated as absent and dropped on next access to the same
//! key; when the cache is full the least-recently-used entry is evicted
//! before a new one is inserted, so capacity is never exceeded.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::time::{Clock, SystemClock};

/// Cache tuning parameters
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub capacity: usize,
    /// Staleness window; entries older than this are discarded on access
    pub ttl: Duration,
}

impl CacheConfig {
    /// Convenience constructor.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self { capacity: capacity.max(1), ttl }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 128, ttl: Duration::from_secs(300) }
    }
}

/// Entry stored in the cache with its insertion timestamp
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// Internal storage for cache entries
#[derive(Debug)]
struct CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    entries: HashMap<K, CacheEntry<V>>,
    /// Tracks recency for LRU eviction; front is oldest
    access_order: Vec<K>,
}

impl<K, V> CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self { entries: HashMap::new(), access_order: Vec::new() }
    }

    fn touch(&mut self, key: &K) {
        self.access_order.retain(|k| k != key);
        self.access_order.push(key.clone());
    }
}

/// Thread-safe bounded cache with TTL expiry and LRU eviction
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `V`: Value type (must be `Clone`)
/// - `C`: Clock type for time-based operations (defaults to `SystemClock`)
pub struct Cache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    storage: Arc<RwLock<CacheStorage<K, V>>>,
    config: CacheConfig,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache with the given configuration using system clock
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    /// Create a new cache with a custom clock (useful for testing)
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self { storage: Arc::new(RwLock::new(CacheStorage::new())), config, clock }
    }

    /// Insert a value, evicting the least-recently-used entry if full.
    pub fn insert(&self, key: K, value: V) {
        let mut storage = self.storage.write().unwrap();

        if storage.entries.len() >= self.config.capacity && !storage.entries.contains_key(&key) {
            if let Some(oldest) = storage.access_order.first().cloned() {
                storage.entries.remove(&oldest);
                storage.access_order.retain(|k| k != &oldest);
                debug!("cache full, evicted least-recently-used entry");
            }
        }

        let entry = CacheEntry { value, inserted_at: self.clock.now() };
        storage.entries.insert(key.clone(), entry);
        storage.touch(&key);
    }

    /// Get a fresh value, discarding the entry if it has gone stale.
    ///
    /// Returns `None` if the key doesn't exist or the entry is older
    /// than the configured TTL. A hit refreshes the key's LRU position.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write().unwrap();

        let inserted_at = storage.entries.get(key)?.inserted_at;
        if self.clock.now().duration_since(inserted_at) >= self.config.ttl {
            storage.entries.remove(key);
            storage.access_order.retain(|k| k != key);
            return None;
        }

        storage.touch(key);
        storage.entries.get(key).map(|e| e.value.clone())
    }

    /// Remove an entry regardless of freshness.
    pub fn remove(&self, key: &K) {
        let mut storage = self.storage.write().unwrap();
        storage.entries.remove(key);
        storage.access_order.retain(|k| k != key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut storage = self.storage.write().unwrap();
        storage.entries.clear();
        storage.access_order.clear();
    }

    /// Number of entries currently held (stale entries included until
    /// their next access).
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.read().unwrap().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached value for `key`, or run `fetch` and cache its
    /// success result.
    ///
    /// Within the TTL the fetch closure is not invoked at all; once the
    /// entry is stale the closure runs again and replaces it. A failed
    /// fetch caches nothing.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }
}

impl<K, V, C> Clone for Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

//! Bounded in-memory TTL cache.
//!
//! Entries carry their own expiry and are evicted lazily on read, or in bulk
//! by `purge_expired`. Capacity is enforced LRU-style so a long-running
//! process cannot grow without bound.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;

use log::debug;
use lru::LruCache;
use tokio::time::Instant;

/// Default number of keys kept before least-recently-used eviction.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Longest honoured TTL; larger values are clamped so expiry cannot overflow.
pub const MAX_TTL: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// A cached value with its expiry instant.
struct CachedEntry<V> {
    data: V,
    expiry: Instant,
}

impl<V> CachedEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expiry < now
    }
}

pub struct MemoryCache<V> {
    entries: Mutex<LruCache<String, CachedEntry<V>>>,
}

impl<V: Clone> MemoryCache<V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return a clone of the value if present and not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(Instant::now()) => return Some(entry.data.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("[Cache] Evicting expired key {}", key);
            entries.pop(key);
        }
        None
    }

    pub fn set(&self, key: &str, value: V, ttl: Duration) {
        let now = Instant::now();
        let expiry = now
            .checked_add(ttl.min(MAX_TTL))
            .unwrap_or_else(|| now + Duration::from_secs(24 * 60 * 60));
        let entry = CachedEntry { data: value, expiry };
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .put(key.to_string(), entry);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop(key)
            .map(|entry| entry.data)
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();

        let stale: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.pop(key);
        }
        stale.len()
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/memory_cache_tests.rs"]
mod tests;

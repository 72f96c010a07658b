//! Freshness-window cache for query results.

use anyhow::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Caches values by key for a fixed time-to-live.
///
/// A zero TTL disables caching. The lock is not held while a value is being
/// computed, so two callers missing the same key may both fetch it.
pub struct QueryCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, V)>>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `key` if it is still inside the freshness window.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let entries = self.entries.lock();
        entries
            .get(key)
            .filter(|(stored, _)| now.saturating_duration_since(*stored) < self.ttl)
            .map(|(_, value)| value.clone())
    }

    /// Store `value` and drop every entry that has left the freshness window.
    pub fn insert(&self, key: &str, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    fn insert_at(&self, key: &str, value: V, now: Instant) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, (stored, _)| now.saturating_duration_since(*stored) < self.ttl);
        if entries.len() < before {
            debug!(evicted = before - entries.len(), "evicted stale cache entries");
        }
        entries.insert(key.to_string(), (now, value));
    }

    /// Return the cached value or compute, store and return a fresh one.
    /// Errors are not cached.
    pub fn get_or_try_insert_with<F>(&self, key: &str, f: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(hit) = self.get(key) {
            debug!(key, "query cache hit");
            return Ok(hit);
        }
        let value = f()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

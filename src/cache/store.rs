//! Cache Store Module
//!
//! Key-value map with per-entry TTL. Expiry is lazy: `get` and `has` drop an
//! entry the moment they find it stale, nothing else does.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InvalidationPattern, DEFAULT_TTL_SECONDS};

// == Cache Store ==
/// Unbounded TTL cache keyed by opaque strings.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// TTL in seconds used by `set_default`
    default_ttl: u64,
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS)
    }
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL in seconds for entries stored with `set_default`
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any previous entry and resetting its clock.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_seconds: u64) {
        self.entries
            .insert(key.into(), CacheEntry::new(value, ttl_seconds));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores a value with the store's default TTL.
    pub fn set_default(&mut self, key: impl Into<String>, value: V) {
        let ttl = self.default_ttl;
        self.set(key, value, ttl);
    }

    // == Get ==
    /// Returns a copy of the live value for `key`.
    ///
    /// A stale entry is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "cache entry expired");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Has ==
    /// Equivalent to `get(key).is_some()`, including removal of a stale entry.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Invalidate ==
    /// Removes every entry selected by `pattern`, returning how many were removed.
    pub fn invalidate(&mut self, pattern: &InvalidationPattern) -> usize {
        let before = self.entries.len();
        match pattern {
            InvalidationPattern::All => self.entries.clear(),
            _ => self.entries.retain(|key, _| !pattern.matches(key)),
        }
        let removed = before - self.entries.len();

        self.stats.record_invalidations(removed);
        self.stats.set_total_entries(self.entries.len());
        debug!(?pattern, removed, "cache invalidated");
        removed
    }

    /// Removes every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> usize {
        self.invalidate(&InvalidationPattern::prefix(prefix))
    }

    /// Removes every entry.
    pub fn clear(&mut self) -> usize {
        self.invalidate(&InvalidationPattern::All)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the TTL used by `set_default`.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Length ==
    /// Number of stored entries, including stale ones not yet noticed by a read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrows the stored entry for `key`, live or not. Does not expire.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    /// Returns true if an entry is stored for `key`, live or not. Does not expire.
    pub fn contains_raw(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

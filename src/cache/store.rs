//! TTL Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order
//! eviction and lazy TTL expiry. The cache is best-effort: no operation
//! returns an error across this boundary. A rejected or missing entry
//! is simply a miss, and the caller falls through to the authoritative
//! data source.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::{pattern, CacheEntry, CacheStats, InsertionTracker, MAX_KEY_LENGTH};

// == TTL Cache ==
/// In-memory key/value cache with per-entry expiry, wildcard
/// invalidation, and an oldest-first capacity bound.
#[derive(Debug)]
pub struct TtlCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion order for capacity eviction
    order: InsertionTracker,
    /// Occupancy and hit/miss counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in milliseconds for `set` calls without an explicit TTL
    default_ttl_ms: u64,
}

impl TtlCache {
    // == Constructor ==
    /// Creates a new cache with the given capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionTracker::new(),
            stats: CacheStats::new(max_entries),
            max_entries,
            default_ttl_ms,
        }
    }

    // == Set ==
    /// Stores a value under `key`, expiring `ttl_ms` from now.
    ///
    /// Overwrites any existing entry and resets its TTL. When the cache
    /// is at capacity, the least recently inserted entry is evicted
    /// first. An over-long key is dropped silently (logged at debug):
    /// the entry is simply never cached and later reads miss.
    pub fn set(&mut self, key: String, value: Value, ttl_ms: Option<u64>) {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            debug!(key_len = key.len(), "cache set dropped: key out of bounds");
            return;
        }

        // A zero-capacity cache stores nothing; every read is a miss
        if self.max_entries == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.order.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
                debug!(key = %evicted_key, "cache evicted oldest entry");
            }
        }

        let entry = CacheEntry::new(value, ttl_ms.unwrap_or(self.default_ttl_ms));
        self.entries.insert(key.clone(), entry);
        self.order.record(&key);
        self.stats.set_size(self.entries.len());
    }

    // == Get ==
    /// Retrieves the value under `key`, if present and not expired.
    ///
    /// Expired entries are removed on access (lazy expiry) and counted
    /// as misses. Reads do not affect eviction order.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.order.remove(key);
                self.stats.set_size(self.entries.len());
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Invalidate ==
    /// Removes the entry under `key` unconditionally.
    ///
    /// Returns true if an entry existed; no-op (false) otherwise.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.order.remove(key);
            self.stats.set_size(self.entries.len());
        }
        existed
    }

    // == Invalidate Pattern ==
    /// Removes every entry whose key matches the wildcard pattern.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_pattern(&mut self, pat: &str) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| pattern::matches(pat, key))
            .cloned()
            .collect();

        for key in &matching {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.stats.set_size(self.entries.len());
        matching.len()
    }

    // == Stats ==
    /// Returns current cache statistics. No mutation.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Sweep Expired ==
    /// Removes all expired entries, returning the number removed.
    ///
    /// Lazy expiry already hides stale entries from `get`; this sweep
    /// bounds memory held by keys nobody re-reads.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.stats.set_size(self.entries.len());
        expired_keys.len()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrites an entry's expiry timestamp. Test hook for expiry
    /// paths without sleeping.
    #[cfg(test)]
    pub(crate) fn force_expire(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.expires_at = 0;
        }
    }
}

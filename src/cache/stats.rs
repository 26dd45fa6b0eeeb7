//! Cache Statistics Module
//!
//! Counts lookups, writes and evictions performed on a cache.

use serde::Serialize;

// == Cache Stats ==
/// Operation counters for an `LruCache`.
///
/// Only `get`/`get_mut` count as lookups. `peek` and `exists` are
/// observational and leave the counters alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found their key
    pub hits: u64,
    /// Lookups that failed with `KeyNotFound`
    pub misses: u64,
    /// Puts that added a new key
    pub insertions: u64,
    /// Puts that replaced the value of an existing key
    pub updates: u64,
    /// Entries dropped to honour the capacity bound
    pub evictions: u64,
    /// Entries dropped by an explicit `remove`
    pub removals: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }
}

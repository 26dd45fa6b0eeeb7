//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::entry::Handle;
use crate::cache::lru::{Iter, RecencyList};
use crate::cache::{CacheStats, DEFAULT_MAX_SIZE};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Fixed-capacity map that evicts the least recently used entry.
///
/// Holds at most `max_size` entries. `put` and successful `get` calls make
/// their key the most recently used; whenever the cache grows past its
/// bound, entries are evicted from the least recently used end.
///
/// # Concurrency
/// The cache performs no internal synchronization. Every mutating method,
/// including `get`, takes `&mut self`. To share one cache between threads,
/// wrap it in a `Mutex` (a `RwLock` buys nothing, since lookups mutate the
/// recency order).
///
/// # Example
/// ```
/// use lru_cache::{CacheError, LruCache};
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.get(&1).unwrap();
/// cache.put(3, "c");
///
/// assert!(!cache.exists(&2));
/// assert_eq!(cache.get(&2), Err(CacheError::KeyNotFound));
/// ```
pub struct LruCache<K, V> {
    /// Key to handle lookup
    index: HashMap<K, Handle>,
    /// Owns the entries, most recently used first
    entries: RecencyList<K, V>,
    /// Operation counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `max_size` entries.
    ///
    /// A `max_size` of 0 is allowed: such a cache evicts every entry as
    /// soon as it is put.
    pub fn new(max_size: usize) -> Self {
        Self {
            index: HashMap::new(),
            entries: RecencyList::new(),
            stats: CacheStats::new(),
            max_size,
        }
    }

    /// Creates an empty cache from a [`CacheConfig`].
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size)
    }

    // == Put ==
    /// Inserts or updates a key-value pair.
    ///
    /// An existing key has its value replaced. Either way the key becomes
    /// the most recently used, then least recently used entries are
    /// evicted until the size is within `max_size`.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    pub fn put(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&handle) => {
                self.entries.entry_mut(handle).value = value;
                self.entries.move_to_front(handle);
                self.stats.record_update();
            }
            None => {
                let handle = self.entries.push_front(key.clone(), value);
                self.index.insert(key, handle);
                self.stats.record_insertion();
            }
        }

        self.trim_to_capacity();
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// The returned borrow ends before the next mutating call on the cache,
    /// since that call may move or evict the entry.
    ///
    /// # Errors
    /// Returns [`CacheError::KeyNotFound`] if the key is absent. Entries and
    /// their order are left untouched in that case.
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.touch(key)?;
        Ok(&self.entries.entry(handle).value)
    }

    /// Like [`get`](Self::get), but returns a mutable borrow of the value.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.touch(key)?;
        Ok(&mut self.entries.entry_mut(handle).value)
    }

    // == Peek ==
    /// Returns a value without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&handle| &self.entries.entry(handle).value)
    }

    /// Returns the entry that would be evicted next.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.entries
            .peek_oldest()
            .map(|entry| (&entry.key, &entry.value))
    }

    // == Remove ==
    /// Removes an entry by key, returning its value.
    ///
    /// Removing an absent key is a no-op and returns None.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        let (_, value) = self.entries.remove(handle);
        self.stats.record_removal();
        Some(value)
    }

    // == Exists ==
    /// Checks whether a key is cached. Never changes recency.
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Size ==
    /// Returns the current number of entries in the cache.
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// Returns the maximum number of entries the cache may hold.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Changes the maximum number of entries.
    ///
    /// Growing the bound never adds or drops entries. Shrinking it below the
    /// current size **evicts entries immediately**, least recently used
    /// first, until the size fits.
    ///
    /// Returns the number of entries evicted.
    pub fn set_max_size(&mut self, max_size: usize) -> usize {
        debug!(
            "Cache capacity changed: {} -> {} ({} entries)",
            self.max_size,
            max_size,
            self.size()
        );
        self.max_size = max_size;
        self.trim_to_capacity()
    }

    // == Clear ==
    /// Removes every entry. Capacity and counters are kept.
    pub fn clear(&mut self) {
        debug!("Clearing cache of {} entries", self.size());
        self.index.clear();
        self.entries.clear();
    }

    // == Iteration ==
    /// Iterates over entries from most to least recently used.
    ///
    /// Does not change recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.entries.iter()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.size();
        stats
    }

    /// Looks up a key, promotes it and records the hit or miss.
    fn touch<Q>(&mut self, key: &Q) -> Result<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&handle) => {
                self.entries.move_to_front(handle);
                self.stats.record_hit();
                Ok(handle)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::KeyNotFound)
            }
        }
    }

    /// Evicts from the least recently used end until size <= max_size.
    ///
    /// Shared by `put` and `set_max_size`. Returns the number evicted.
    fn trim_to_capacity(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.max_size {
            let Some((key, _)) = self.entries.evict_oldest() else {
                break;
            };
            self.index.remove(&key);
            evicted += 1;
        }

        if evicted > 0 {
            trace!(
                "Evicted {} least recently used entries (max_size={})",
                evicted,
                self.max_size
            );
            self.stats.record_evictions(evicted);
        }
        evicted
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most [`DEFAULT_MAX_SIZE`] entries.
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with strict LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use lru::Iter;
pub use stats::CacheStats;
pub use store::LruCache;

// == Public Constants ==
/// Capacity used by `LruCache::default()` and `CacheConfig::default()`
pub const DEFAULT_MAX_SIZE: usize = 10;

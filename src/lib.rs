//! LRU Cache - A generic fixed-capacity in-memory cache
//!
//! Maps keys to values, holds at most a configured number of entries and
//! evicts the least recently used entry when that bound is exceeded.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, LruCache, DEFAULT_MAX_SIZE};
pub use config::CacheConfig;
pub use error::{CacheError, Result};

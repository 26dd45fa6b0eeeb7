//! Configuration Module
//!
//! Construction-time settings for an `LruCache`.

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_MAX_SIZE;

/// Cache configuration parameters.
///
/// Deserializable so a host application can embed it in its own
/// configuration file. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
}

impl CacheConfig {
    /// Creates a config with the given entry limit.
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// Returns a copy of this config with a different entry limit.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

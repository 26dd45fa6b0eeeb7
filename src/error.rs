//! Error types for the LRU cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors returned by cache lookups.
///
/// `KeyNotFound` is the only failure the cache reports. Every other
/// operation is total over its inputs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Key not present in the cache
    #[error("There is no such key in cache")]
    KeyNotFound,
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

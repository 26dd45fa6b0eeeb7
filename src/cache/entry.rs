//! Cache Entry Module
//!
//! Defines the arena slot types backing the recency list.

// == Handle ==
/// Stable identifier of a slot in the recency list's arena.
///
/// A handle stays valid from the moment its entry is pushed until that
/// entry is removed or evicted. Freed slots are reused, so a handle must
/// never outlive the index mapping that refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

impl Handle {
    pub(crate) fn new(slot: usize) -> Self {
        Self(slot)
    }

    pub(crate) fn slot(self) -> usize {
        self.0
    }
}

// == Cache Entry ==
/// A single key/value pair plus its links in the recency order.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<K, V> {
    /// The key, kept so eviction can clear the index mapping
    pub(crate) key: K,
    /// The stored value
    pub(crate) value: V,
    /// Neighbour closer to the most recently used end
    pub(crate) prev: Option<Handle>,
    /// Neighbour closer to the least recently used end
    pub(crate) next: Option<Handle>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }
}

// == Slot ==
/// One cell of the arena: either a live entry or a link in the free list.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    Occupied(CacheEntry<K, V>),
    Free { next_free: Option<Handle> },
}

impl<K, V> Slot<K, V> {
    pub(crate) fn entry(&self) -> &CacheEntry<K, V> {
        match self {
            Slot::Occupied(entry) => entry,
            Slot::Free { .. } => unreachable!("handle refers to a free slot"),
        }
    }

    pub(crate) fn entry_mut(&mut self) -> &mut CacheEntry<K, V> {
        match self {
            Slot::Occupied(entry) => entry,
            Slot::Free { .. } => unreachable!("handle refers to a free slot"),
        }
    }
}

//! Recency List Module
//!
//! Arena-backed doubly-linked list ordering entries by access time.

use std::iter::FusedIterator;

use crate::cache::entry::{CacheEntry, Handle, Slot};

// == Recency List ==
/// Owns every cached entry and keeps them in recency order.
///
/// Entries live in a `Vec` of slots and are linked through `prev`/`next`
/// handles:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Removed slots are threaded onto a free list and reused by later pushes,
/// so handles held by the index stay stable while their entry is live.
#[derive(Debug, Clone)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    free_head: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
        }
    }

    // == Length ==
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena slots ever allocated, live or free.
    #[cfg(test)]
    pub(crate) fn slots_allocated(&self) -> usize {
        self.slots.len()
    }

    // == Entry Access ==
    pub(crate) fn entry(&self, handle: Handle) -> &CacheEntry<K, V> {
        self.slots[handle.slot()].entry()
    }

    pub(crate) fn entry_mut(&mut self, handle: Handle) -> &mut CacheEntry<K, V> {
        self.slots[handle.slot()].entry_mut()
    }

    // == Push Front ==
    /// Inserts a new entry as the most recently used and returns its handle.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> Handle {
        let handle = self.alloc(CacheEntry::new(key, value));
        self.link_front(handle);
        self.len += 1;
        handle
    }

    // == Move To Front ==
    /// Marks an entry as most recently used by splicing it to the head.
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    // == Remove ==
    /// Unlinks an entry, frees its slot and returns its key and value.
    pub(crate) fn remove(&mut self, handle: Handle) -> (K, V) {
        self.unlink(handle);
        self.len -= 1;
        let entry = self.free(handle);
        (entry.key, entry.value)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub(crate) fn evict_oldest(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        Some(self.remove(tail))
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without removing it.
    pub(crate) fn peek_oldest(&self) -> Option<&CacheEntry<K, V>> {
        self.tail.map(|tail| self.entry(tail))
    }

    // == Clear ==
    /// Drops every entry and releases the arena.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free_head = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Iterates from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn alloc(&mut self, entry: CacheEntry<K, V>) -> Handle {
        match self.free_head {
            Some(handle) => {
                let slot = &mut self.slots[handle.slot()];
                self.free_head = match slot {
                    Slot::Free { next_free } => *next_free,
                    Slot::Occupied(_) => unreachable!("free list points at a live slot"),
                };
                *slot = Slot::Occupied(entry);
                handle
            }
            None => {
                self.slots.push(Slot::Occupied(entry));
                Handle::new(self.slots.len() - 1)
            }
        }
    }

    fn free(&mut self, handle: Handle) -> CacheEntry<K, V> {
        let freed = Slot::Free {
            next_free: self.free_head,
        };
        self.free_head = Some(handle);
        match std::mem::replace(&mut self.slots[handle.slot()], freed) {
            Slot::Occupied(entry) => entry,
            Slot::Free { .. } => unreachable!("double free of slot {}", handle.slot()),
        }
    }

    fn link_front(&mut self, handle: Handle) {
        let old_head = self.head;
        {
            let entry = self.entry_mut(handle);
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(old) => self.entry_mut(old).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let entry = self.entry_mut(handle);
            (entry.prev.take(), entry.next.take())
        };
        match prev {
            Some(prev) => self.entry_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.entry_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Iterator over cached entries, most recently used first.
///
/// Created by [`LruCache::iter`](crate::LruCache::iter). Iterating does
/// not change recency. Use `.rev()` to walk from least recently used.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.entry(self.front?);
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.entry(self.back?);
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

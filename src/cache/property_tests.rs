//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a naive reference model.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

use crate::cache::LruCache;
use crate::error::CacheError;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 8;

// == Reference Model ==
/// Linear-scan LRU: front = most recently used.
#[derive(Debug)]
struct ModelCache {
    order: VecDeque<(u8, u32)>,
    max_size: usize,
}

impl ModelCache {
    fn new(max_size: usize) -> Self {
        Self {
            order: VecDeque::new(),
            max_size,
        }
    }

    fn put(&mut self, key: u8, value: u32) {
        self.order.retain(|(k, _)| *k != key);
        self.order.push_front((key, value));
        self.order.truncate(self.max_size);
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.order.iter().position(|(k, _)| *k == key)?;
        let entry = self.order.remove(pos)?;
        self.order.push_front(entry);
        Some(entry.1)
    }

    fn remove(&mut self, key: u8) -> Option<u32> {
        let pos = self.order.iter().position(|(k, _)| *k == key)?;
        self.order.remove(pos).map(|(_, v)| v)
    }

    fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.order.truncate(max_size);
    }
}

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..16
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
    Remove { key: u8 },
    Exists { key: u8 },
    Resize { max_size: usize },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Exists { key }),
        1 => (0usize..12).prop_map(|max_size| CacheOp::Resize { max_size }),
    ]
}

fn recency_keys(cache: &LruCache<u8, u32>) -> Vec<u8> {
    cache.iter().map(|(k, _)| *k).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Any operation sequence leaves the cache equal to the model: same keys,
    // same values, same recency order, and size within max_size.
    #[test]
    fn prop_matches_reference_model(
        initial_max in 0usize..TEST_MAX_SIZE,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let mut cache = LruCache::new(initial_max);
        let mut model = ModelCache::new(initial_max);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key, value);
                    model.put(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(key).ok_or(CacheError::KeyNotFound);
                    prop_assert_eq!(cache.get(&key).copied(), expected);
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(&key), model.remove(key));
                }
                CacheOp::Exists { key } => {
                    let expected = model.order.iter().any(|(k, _)| *k == key);
                    prop_assert_eq!(cache.exists(&key), expected);
                }
                CacheOp::Resize { max_size } => {
                    let before = model.order.len();
                    model.set_max_size(max_size);
                    let evicted = cache.set_max_size(max_size);
                    prop_assert_eq!(evicted, before - model.order.len());
                }
            }

            prop_assert!(
                cache.size() <= cache.max_size(),
                "Cache size {} exceeds max {}",
                cache.size(),
                cache.max_size()
            );
            let expected: Vec<(u8, u32)> = model.order.iter().copied().collect();
            let actual: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    // The keys reachable through exists() are exactly the keys held in
    // the recency list.
    #[test]
    fn prop_index_and_list_agree(ops in prop::collection::vec(cache_op_strategy(), 1..100)) {
        let mut cache = LruCache::new(TEST_MAX_SIZE);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key } => { let _ = cache.get(&key); }
                CacheOp::Remove { key } => { cache.remove(&key); }
                CacheOp::Exists { .. } => {}
                CacheOp::Resize { max_size } => { cache.set_max_size(max_size); }
            }
        }

        let listed: HashSet<u8> = recency_keys(&cache).into_iter().collect();
        let indexed: HashSet<u8> = (0u8..16).filter(|k| cache.exists(k)).collect();
        prop_assert_eq!(listed.len(), cache.size());
        prop_assert_eq!(listed, indexed);
    }

    // After put or a successful get, the key is the most recently used and
    // outlives every other key under pure insertion pressure.
    #[test]
    fn prop_touched_key_is_evicted_last(
        keys in prop::collection::hash_set(key_strategy(), 2..TEST_MAX_SIZE),
        pick in any::<prop::sample::Index>(),
        via_get in any::<bool>()
    ) {
        let keys: Vec<u8> = keys.into_iter().collect();
        let capacity = keys.len();
        let mut cache = LruCache::new(capacity);
        for &key in &keys {
            cache.put(key, u32::from(key));
        }

        let touched = keys[pick.index(keys.len())];
        if via_get {
            cache.get(&touched).unwrap();
        } else {
            cache.put(touched, 999);
        }
        prop_assert_eq!(recency_keys(&cache)[0], touched);

        // Push every other key out with fresh ones
        for fresh in 100u8..(100 + capacity as u8 - 1) {
            cache.put(fresh, 0);
        }
        prop_assert!(cache.exists(&touched));
        for key in keys.iter().filter(|&&k| k != touched) {
            prop_assert!(!cache.exists(key), "key {} should have been evicted", key);
        }
    }

    // C + 1 distinct puts with no gets evict the first key inserted.
    #[test]
    fn prop_first_inserted_is_evicted(
        keys in prop::collection::hash_set(key_strategy(), 2..16)
    ) {
        let keys: Vec<u8> = keys.into_iter().collect();
        let capacity = keys.len() - 1;
        let mut cache = LruCache::new(capacity);

        for &key in &keys {
            cache.put(key, u32::from(key));
        }

        prop_assert_eq!(cache.size(), capacity);
        prop_assert!(!cache.exists(&keys[0]));
        for key in &keys[1..] {
            prop_assert!(cache.exists(key));
        }
    }

    // put then get returns the value put; remove makes the key vanish.
    #[test]
    fn prop_put_get_remove(key in key_strategy(), value in any::<u32>()) {
        let mut cache = LruCache::new(TEST_MAX_SIZE);

        cache.put(key, value);
        prop_assert_eq!(cache.get(&key).copied(), Ok(value));

        cache.remove(&key);
        prop_assert!(!cache.exists(&key));
        prop_assert_eq!(cache.get(&key).copied(), Err(CacheError::KeyNotFound));
    }

    // Shrinking to M < N keeps exactly the M most recently used entries.
    #[test]
    fn prop_resize_keeps_most_recent(
        ops in prop::collection::vec(cache_op_strategy(), 1..100),
        new_max in 0usize..TEST_MAX_SIZE
    ) {
        let mut cache = LruCache::new(TEST_MAX_SIZE);
        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key } => { let _ = cache.get(&key); }
                _ => {}
            }
        }

        let before = recency_keys(&cache);
        prop_assume!(new_max < before.len());

        cache.set_max_size(new_max);

        prop_assert_eq!(cache.size(), new_max);
        prop_assert_eq!(recency_keys(&cache), before[..new_max].to_vec());
    }
}

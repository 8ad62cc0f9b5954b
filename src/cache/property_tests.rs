//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple reference model.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

use crate::cache::LruStore;

// == Reference Model ==
/// Keys kept front = most recent, back = least recent, with linear scans.
#[derive(Debug, Default)]
struct ModelLru {
    order: VecDeque<(u8, u32)>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    fn take(&mut self, key: u8) -> Option<(u8, u32)> {
        let pos = self.order.iter().position(|(k, _)| *k == key)?;
        self.order.remove(pos)
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        match self.take(key) {
            Some(entry) => {
                self.hits += 1;
                self.order.push_front(entry);
                Some(entry.1)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn put(&mut self, key: u8, value: u32) {
        if self.take(key).is_none() && self.order.len() >= self.capacity {
            self.order.pop_back();
        }
        self.order.push_front((key, value));
    }

    fn keys(&self) -> Vec<u8> {
        self.order.iter().map(|(k, _)| *k).collect()
    }
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
    Reset,
    ResetStats,
}

/// Small key space so that hits, overwrites and evictions all happen
fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (0u8..16, any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        6 => (0u8..16).prop_map(|key| CacheOp::Get { key }),
        1 => Just(CacheOp::Reset),
        1 => Just(CacheOp::ResetStats),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every get result, the recency order and the counters match the model
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let mut store = LruStore::new(capacity).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key, value);
                    model.put(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(key), "get({}) mismatch", key);
                }
                CacheOp::Reset => {
                    store.reset();
                    model = ModelLru::new(capacity);
                }
                CacheOp::ResetStats => {
                    store.reset_stats();
                    model.hits = 0;
                    model.misses = 0;
                }
            }

            prop_assert_eq!(store.recency_order(), model.keys());
            prop_assert_eq!(store.stats().hits, model.hits);
            prop_assert_eq!(store.stats().misses, model.misses);
        }
    }

    // Size never exceeds capacity and the list and index stay in sync
    #[test]
    fn prop_capacity_and_index_in_sync(
        capacity in 1usize..20,
        keys in prop::collection::vec(0u16..64, 1..300)
    ) {
        let mut store = LruStore::new(capacity).unwrap();

        for key in keys {
            store.put(key, key);
            prop_assert!(store.len() <= capacity, "Size {} exceeds capacity {}", store.len(), capacity);

            let order = store.recency_order();
            let unique: HashSet<_> = order.iter().copied().collect();
            prop_assert_eq!(order.len(), store.len(), "List and index sizes differ");
            prop_assert_eq!(unique.len(), order.len(), "Key visited twice");
            for k in &order {
                prop_assert!(store.contains(k));
            }
        }
    }

    // The (capacity+1)-th distinct insertion evicts the least recently used key
    #[test]
    fn prop_evicts_least_recently_used(
        capacity in 2usize..10,
        touch in 0usize..10
    ) {
        let touch = touch % capacity;
        let mut store = LruStore::new(capacity).unwrap();
        for key in 0..capacity {
            store.put(key, key);
        }

        prop_assert_eq!(store.get(&touch), Some(touch));
        let expected_victim = if touch == 0 { 1 } else { 0 };

        store.put(capacity, capacity);

        prop_assert!(!store.contains(&expected_victim), "{} should be evicted", expected_victim);
        prop_assert!(store.contains(&touch), "Touched key {} should survive", touch);
        prop_assert_eq!(store.len(), capacity);
        prop_assert_eq!(store.stats().evictions, 1);
    }

    // Overwriting replaces the value and leaves the counters alone
    #[test]
    fn prop_overwrite_semantics(key in any::<u8>(), value1 in any::<u32>(), value2 in any::<u32>()) {
        let mut store = LruStore::new(4).unwrap();

        store.put(key, value1);
        store.put(key, value2);

        prop_assert_eq!(store.stats().hits, 0);
        prop_assert_eq!(store.stats().misses, 0);
        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }
}

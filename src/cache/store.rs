//! Cache Store Module
//!
//! Main cache engine combining the entry arena, the recency list and a
//! key index behind get/put/reset with eviction on overflow.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::entry::{CacheEntry, EntryStore, SlotId};
use crate::cache::{CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Capacity-bounded LRU storage.
///
/// Not synchronized on its own; `get` promotes and therefore needs `&mut self`.
/// Wrap it in a lock (see [`LruCache`](crate::cache::LruCache)) to share it.
#[derive(Debug)]
pub struct LruStore<K, V> {
    /// Owner of every live entry
    entries: EntryStore<K, V>,
    /// Most-recent to least-recent ordering over `entries`
    order: RecencyList,
    /// Key to slot lookup, same membership as `order`
    index: HashMap<K, SlotId>,
    /// Hit/miss/eviction counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            entries: EntryStore::with_capacity(capacity),
            order: RecencyList::new(),
            index: HashMap::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// A hit promotes the entry to most recently used; a miss leaves the
    /// ordering untouched. Either way the matching counter is bumped.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let Some(id) = self.index.get(key).copied() else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.order.move_to_front(&mut self.entries, id);
        self.entries.get(id).map(|entry| entry.value.clone())
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// An existing key is overwritten in place and promoted. A new key
    /// evicts the least recently used entry first when the store is full.
    /// Hit/miss counters are not affected.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(id) = self.index.get(&key).copied() {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
            }
            self.order.move_to_front(&mut self.entries, id);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let id = self.entries.insert(CacheEntry::new(key.clone(), value));
        self.order.push_front(&mut self.entries, id);
        self.index.insert(key, id);
    }

    // == Evict ==
    /// Removes the entry at the tail of the recency list.
    fn evict_lru(&mut self) -> Option<K> {
        let id = self.order.pop_back(&mut self.entries)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();
        debug!(slot = id, "Evicted least recently used entry");
        Some(entry.key)
    }

    // == Reset ==
    /// Drops every entry and zeroes the statistics.
    pub fn reset(&mut self) {
        self.index.clear();
        self.order.clear();
        self.entries.clear();
        self.stats.reset();
    }

    /// Zeroes the statistics, leaving entries in place.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Stats ==
    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    // == Contains ==
    /// True if `key` is cached. Does not promote or count as a lookup.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Recency Order ==
    /// Keys from most to least recently used.
    pub fn recency_order(&self) -> Vec<K> {
        self.order
            .iter(&self.entries)
            .filter_map(|id| self.entries.get(id).map(|entry| entry.key.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

//! Shared Cache Module
//!
//! Thread-safe handle around [`LruStore`] plus the lifecycle of its reaper.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::cache::{CacheStats, LruStore};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::{spawn_reaper, ReaperHandle};

// == LRU Cache ==
/// Concurrent LRU cache with an optional periodic flush.
///
/// Every operation that can change the recency order takes the write
/// lock, `get` included. Read-only queries share the read lock.
///
/// Call [`shutdown`](Self::shutdown) before dropping a cache with a reaper;
/// `Drop` can only abort the task, not wait for it.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Entries, recency list, index and stats behind one lock
    store: Arc<RwLock<LruStore<K, V>>>,
    /// Running reaper, None if never started or already stopped
    reaper: Mutex<Option<ReaperHandle>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a plain capacity-bounded cache with no background task.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let store = LruStore::new(capacity)?;
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
            reaper: Mutex::new(None),
            capacity,
        })
    }

    /// Creates a cache that is flushed completely every `interval`.
    ///
    /// A zero interval starts no reaper.
    ///
    /// # Panics
    /// Panics if `interval` is non-zero and no tokio runtime is running.
    pub fn with_cleanup_interval(capacity: usize, interval: Duration) -> Result<Self> {
        let mut cache = Self::new(capacity)?;
        if interval.is_zero() {
            return Ok(cache);
        }

        let reaper = spawn_reaper(cache.store.clone(), interval);
        *cache.reaper.get_mut() = Some(reaper);
        info!(capacity, "Cache created with reaper");
        Ok(cache)
    }

    /// Creates a cache from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.cleanup_interval() {
            Some(interval) => Self::with_cleanup_interval(config.capacity, interval),
            None => Self::new(config.capacity),
        }
    }

    // == Get ==
    /// Retrieves a copy of the value under `key`, promoting it on a hit.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.store.write().await.get(key)
    }

    // == Put ==
    /// Inserts or overwrites `key`, evicting the LRU entry when full.
    pub async fn put(&self, key: K, value: V) {
        self.store.write().await.put(key, value);
    }

    // == Stats ==
    /// Snapshot of hits, misses and evictions taken under a single lock.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn reset_stats(&self) {
        self.store.write().await.reset_stats();
    }

    // == Reset ==
    /// Clears every entry and zeroes the statistics.
    pub async fn reset(&self) {
        self.store.write().await.reset();
    }

    /// True if `key` is cached, without promoting it or counting a lookup.
    pub async fn contains(&self, key: &K) -> bool {
        self.store.read().await.contains(key)
    }

    /// Keys from most to least recently used.
    pub async fn recency_order(&self) -> Vec<K> {
        self.store.read().await.recency_order()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True while a reaper task is attached and still running.
    pub async fn has_reaper(&self) -> bool {
        self.reaper
            .lock()
            .await
            .as_ref()
            .is_some_and(|reaper| !reaper.is_finished())
    }

    // == Shutdown ==
    /// Stops and joins the reaper, then releases every entry.
    ///
    /// Idempotent. Concurrent callers all wait for the reaper to exit.
    pub async fn shutdown(&self) {
        {
            let mut reaper = self.reaper.lock().await;
            if let Some(handle) = reaper.take() {
                handle.stop().await;
                info!("Cache reaper joined");
            }
        }
        self.store.write().await.reset();
    }
}

impl<K, V> Drop for LruCache<K, V> {
    fn drop(&mut self) {
        if let Some(reaper) = self.reaper.get_mut().take() {
            reaper.abort();
        }
    }
}

//! Cache Registry Module
//!
//! Hands out shared caches by name. The registry is an ordinary value owned
//! by the application, not process-wide state.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::LruCache;
use crate::config::Config;
use crate::error::Result;

// == Cache Registry ==
/// Map from name to a lazily created [`LruCache`].
#[derive(Debug)]
pub struct CacheRegistry<K, V> {
    caches: RwLock<HashMap<String, Arc<LruCache<K, V>>>>,
    /// Configuration used by [`get_or_create`](Self::get_or_create)
    defaults: Config,
}

impl<K, V> CacheRegistry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty registry whose lazily created caches use `defaults`.
    pub fn new(defaults: Config) -> Self {
        Self {
            caches: RwLock::new(HashMap::new()),
            defaults,
        }
    }

    // == Get Or Create ==
    /// Returns the cache called `name`, creating it with the default
    /// configuration on first use.
    ///
    /// # Errors
    /// Fails only if the default configuration has a zero capacity.
    pub async fn get_or_create(&self, name: &str) -> Result<Arc<LruCache<K, V>>> {
        if let Some(cache) = self.caches.read().await.get(name) {
            return Ok(cache.clone());
        }

        let mut caches = self.caches.write().await;
        // Another caller may have created it between the two locks
        if let Some(cache) = caches.get(name) {
            return Ok(cache.clone());
        }

        let cache = Arc::new(LruCache::from_config(&self.defaults)?);
        caches.insert(name.to_string(), cache.clone());
        info!(name, capacity = self.defaults.capacity, "Registered cache");
        Ok(cache)
    }

    // == Create ==
    /// Installs a cache built from `config` under `name`.
    ///
    /// A cache previously registered under the same name is shut down.
    pub async fn create(&self, name: &str, config: &Config) -> Result<Arc<LruCache<K, V>>> {
        let cache = Arc::new(LruCache::from_config(config)?);
        let previous = self
            .caches
            .write()
            .await
            .insert(name.to_string(), cache.clone());

        if let Some(previous) = previous {
            previous.shutdown().await;
        }
        info!(name, capacity = config.capacity, "Registered cache");
        Ok(cache)
    }

    /// Returns the cache called `name` if it exists.
    pub async fn get(&self, name: &str) -> Option<Arc<LruCache<K, V>>> {
        self.caches.read().await.get(name).cloned()
    }

    // == Remove ==
    /// Unregisters `name`, shutting its cache down.
    ///
    /// Returns false if no such cache was registered.
    pub async fn remove(&self, name: &str) -> bool {
        let removed = self.caches.write().await.remove(name);
        match removed {
            Some(cache) => {
                cache.shutdown().await;
                true
            }
            None => false,
        }
    }

    /// Names of all registered caches, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    // == Shutdown All ==
    /// Shuts down and unregisters every cache.
    pub async fn shutdown_all(&self) {
        let caches: Vec<_> = self.caches.write().await.drain().collect();
        for (name, cache) in caches {
            cache.shutdown().await;
            info!(name = %name, "Cache shut down");
        }
    }
}

impl<K, V> Default for CacheRegistry<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(Config::default())
    }
}

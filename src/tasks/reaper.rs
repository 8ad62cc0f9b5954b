//! Cache Reaper Task
//!
//! Background task that periodically flushes an entire cache.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::LruStore;

// == Reaper Handle ==
/// Owner of a running reaper task.
///
/// Dropping the handle without calling [`stop`](Self::stop) or
/// [`abort`](Self::abort) closes the stop channel, which also ends the task.
#[derive(Debug)]
pub struct ReaperHandle {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ReaperHandle {
    // == Stop ==
    /// Signals the task to stop and waits until it has exited.
    ///
    /// A flush already holding the lock finishes first; no flush starts
    /// after this returns.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(err) = self.handle.await {
            warn!("Cache reaper ended abnormally: {}", err);
        }
    }

    // == Abort ==
    /// Signals stop and aborts the task without waiting for it.
    ///
    /// For contexts that cannot await, such as `Drop`.
    pub fn abort(self) {
        let _ = self.stop_tx.send(true);
        self.handle.abort();
    }

    /// True once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a task that clears the whole cache every `interval`.
///
/// Each wait races the interval against the stop channel, so a stop
/// request wakes the task immediately instead of after the remaining
/// interval. A flush takes the write lock and resets entries and stats.
///
/// # Panics
/// Panics if called outside of a tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(LruStore::<u32, u32>::new(100)?));
/// let reaper = spawn_reaper(store.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// reaper.stop().await;
/// ```
pub fn spawn_reaper<K, V>(cache: Arc<RwLock<LruStore<K, V>>>, interval: Duration) -> ReaperHandle
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!(
            "Starting cache reaper with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::select! {
                biased;

                // A send or a dropped sender both mean stop
                _ = stop_rx.changed() => break,

                _ = tokio::time::sleep(interval) => {
                    let flushed = {
                        let mut cache_guard = cache.write().await;
                        let count = cache_guard.len();
                        cache_guard.reset();
                        count
                    };

                    if flushed > 0 {
                        info!("Cache reaper: flushed {} entries", flushed);
                    } else {
                        debug!("Cache reaper: cache already empty");
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    });

    ReaperHandle { stop_tx, handle }
}

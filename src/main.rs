//! LRU Reaper demo driver
//!
//! Exercises a pair of named caches: a small single-task eviction walk and
//! a multi-task workload, then logs their statistics and shuts down.

use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_reaper::{CacheRegistry, CacheStats, Config, LruCache};

const WORKERS: i32 = 4;
const OPS_PER_WORKER: i32 = 1000;
const KEY_SPACE: i32 = 10;

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache registry
/// 4. Run the workloads, or stop early on Ctrl+C
/// 5. Shut every cache down (joins the reapers)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_reaper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LRU Reaper demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, cleanup_interval={}s",
        config.capacity, config.cleanup_interval
    );

    let registry: Arc<CacheRegistry<i32, i32>> = Arc::new(CacheRegistry::new(config.clone()));

    tokio::select! {
        result = run_workloads(&registry, &config) => result?,
        _ = signal::ctrl_c() => {
            warn!("Received Ctrl+C, stopping early");
        }
    }

    registry.shutdown_all().await;
    info!("Demo complete");
    Ok(())
}

async fn run_workloads(registry: &CacheRegistry<i32, i32>, config: &Config) -> anyhow::Result<()> {
    let small = registry
        .create("eviction", &Config { capacity: 2, ..config.clone() })
        .await
        .context("creating eviction cache")?;
    eviction_walk(&small).await;
    log_stats("eviction", small.stats().await)?;

    let shared = registry
        .create("concurrent", &Config { capacity: 5, ..config.clone() })
        .await
        .context("creating concurrent cache")?;
    let retrieved = concurrent_workload(shared.clone()).await?;
    info!("Successful retrievals: {}", retrieved);
    log_stats("concurrent", shared.stats().await)?;

    // Lazily created with the configured defaults
    let default = registry.get_or_create("default").await?;
    default.put(42, 42).await;
    info!(
        "Default cache holds {} of {} entries",
        default.len().await,
        default.capacity()
    );

    Ok(())
}

/// put 1, put 2, get 1, put 3 (evicts 2), overwrite 1, put 4 (evicts 3).
async fn eviction_walk(cache: &LruCache<i32, i32>) {
    cache.put(1, 1).await;
    cache.put(2, 2).await;
    info!("get(1) = {:?}", cache.get(&1).await);

    cache.put(3, 3).await;
    info!("get(2) after eviction = {:?}", cache.get(&2).await);

    cache.put(1, 4).await;
    info!("get(1) after overwrite = {:?}", cache.get(&1).await);

    cache.put(4, 4).await;
    info!("get(3) after eviction = {:?}", cache.get(&3).await);
    info!("Recency order: {:?}", cache.recency_order().await);
}

async fn concurrent_workload(cache: Arc<LruCache<i32, i32>>) -> anyhow::Result<u64> {
    let mut workers = Vec::new();

    for worker in 0..WORKERS {
        let cache = cache.clone();
        workers.push(tokio::spawn(async move {
            let mut found = 0u64;
            for i in 0..OPS_PER_WORKER {
                let key = (worker * OPS_PER_WORKER + i) % KEY_SPACE;
                if i % 2 == 0 {
                    cache.put(key, worker).await;
                }
                if i % 3 == 0 && cache.get(&key).await.is_some() {
                    found += 1;
                }
            }
            found
        }));
    }

    let mut total = 0;
    for worker in workers {
        total += worker.await.context("worker task failed")?;
    }
    Ok(total)
}

fn log_stats(name: &str, stats: CacheStats) -> anyhow::Result<()> {
    let json = serde_json::to_string(&stats)?;
    info!(cache = name, hit_rate = stats.hit_rate(), "Stats: {}", json);
    Ok(())
}

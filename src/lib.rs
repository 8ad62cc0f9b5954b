//! LRU Reaper - A bounded, thread-safe in-memory cache
//!
//! Provides LRU eviction, hit/miss statistics and an optional background
//! task that periodically flushes the whole cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod tasks;

pub use cache::{CacheStats, LruCache, LruStore};
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::CacheRegistry;
pub use tasks::spawn_reaper;

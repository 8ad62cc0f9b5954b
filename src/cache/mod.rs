//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, EntryStore, SlotId};
pub use lru::RecencyList;
pub use shared::LruCache;
pub use stats::CacheStats;
pub use store::LruStore;

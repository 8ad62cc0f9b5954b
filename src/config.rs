//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default number of entries a cache holds.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default reaper period in seconds.
pub const DEFAULT_CLEANUP_INTERVAL: u64 = 60;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Reaper interval in seconds, 0 disables the reaper
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `CLEANUP_INTERVAL` - Flush period in seconds, 0 = never (default: 60)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CLEANUP_INTERVAL),
        }
    }

    /// A configuration without a reaper.
    pub fn without_cleanup(capacity: usize) -> Self {
        Self {
            capacity,
            cleanup_interval: 0,
        }
    }

    /// The reaper period, or None when the reaper is disabled.
    pub fn cleanup_interval(&self) -> Option<Duration> {
        match self.cleanup_interval {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

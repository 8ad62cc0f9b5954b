//! Background Tasks Module
//!
//! Contains background tasks that run alongside a cache.
//!
//! # Tasks
//! - Reaper: flushes the whole cache at a configured interval

mod reaper;

pub use reaper::{spawn_reaper, ReaperHandle};

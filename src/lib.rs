//! lrucache - A bounded in-memory key-value cache
//!
//! Entries are evicted least-recently-used first once the cache is full, and
//! expire a fixed time after insertion when a TTL is configured. Expired
//! entries are purged lazily when observed, or eagerly by the optional
//! background sweeper.

pub mod cache;
pub mod config;
pub mod error;
#[cfg(feature = "sweeper")]
pub mod tasks;

pub use cache::{CacheStats, CacheStore, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
#[cfg(feature = "sweeper")]
pub use tasks::{spawn_sweeper_task, spawn_sweeper_task_from_config};

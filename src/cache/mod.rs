//! Cache Module
//!
//! Provides an in-memory cache with LRU eviction and TTL expiration.
//!
//! # Layout
//! - `arena`: entries threaded onto recency and age lists
//! - `store`: unsynchronized engine with the eviction policy
//! - `shared`: thread-safe handle around the store

mod arena;
mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use shared::LruCache;
pub use stats::CacheStats;
pub use store::CacheStore;

//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Expiry Sweeper: Removes expired cache entries at configured intervals

mod sweeper;

pub use sweeper::{spawn_sweeper_task, spawn_sweeper_task_from_config};

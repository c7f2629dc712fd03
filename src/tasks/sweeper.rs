//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries, so memory
//! held by entries nobody reads again is reclaimed without waiting for a put
//! or get to observe them.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruCache;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task sleeps for `interval` between runs and holds the cache lock only
/// while purging. Must be called from within a tokio runtime.
///
/// # Errors
/// - `CacheError::InvalidSweepInterval` if `interval` is zero
///
/// # Returns
/// A JoinHandle for the spawned task; abort it on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LruCache::new(1000, Duration::from_secs(300)));
/// let sweeper = spawn_sweeper_task(cache.clone(), Duration::from_secs(1))?;
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper_task<K, V>(
    cache: Arc<LruCache<K, V>>,
    interval: Duration,
) -> Result<JoinHandle<()>>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    if interval.is_zero() {
        return Err(CacheError::InvalidSweepInterval(0));
    }

    Ok(tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting expiry sweeper task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    }))
}

/// Spawns the sweeper with the interval from a loaded `CacheConfig`.
pub fn spawn_sweeper_task_from_config<K, V>(
    cache: Arc<LruCache<K, V>>,
    config: &CacheConfig,
) -> Result<JoinHandle<()>>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    spawn_sweeper_task(cache, config.sweep_interval()?)
}

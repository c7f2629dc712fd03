//! Configuration Module
//!
//! Handles loading cache configuration from environment variables or from a
//! host service's own configuration file.

use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// Values are signed so that out-of-range input survives parsing and is
/// rejected with a proper error by `LruCache::from_config`. A zero sweep
/// interval is rejected by `sweep_interval`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries, 0 = unbounded
    pub max_size: i64,
    /// Entry time-to-live in milliseconds, 0 = entries never expire
    pub ttl_ms: i64,
    /// Background sweeper interval in milliseconds
    pub sweep_interval_ms: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRUCACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `LRUCACHE_TTL_MS` - Entry TTL in milliseconds (default: 0)
    /// - `LRUCACHE_SWEEP_INTERVAL_MS` - Sweeper frequency in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env::var("LRUCACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_size),
            ttl_ms: env::var("LRUCACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_ms),
            sweep_interval_ms: env::var("LRUCACHE_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_ms),
        }
    }

    // == Sweep Interval ==
    /// Returns the background sweeper interval.
    ///
    /// # Errors
    /// - `CacheError::InvalidSweepInterval` if the interval is zero
    pub fn sweep_interval(&self) -> Result<Duration> {
        if self.sweep_interval_ms == 0 {
            return Err(CacheError::InvalidSweepInterval(self.sweep_interval_ms));
        }
        Ok(Duration::from_millis(self.sweep_interval_ms))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 1000,
            ttl_ms: 0,
            sweep_interval_ms: 1000,
        }
    }
}

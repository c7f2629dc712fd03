//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while constructing a cache or its background sweeper.
///
/// Every other cache operation is total: absence is reported through
/// `Option`/`bool` results, never through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Maximum entry count was negative
    #[error("Invalid max size: {0} (must be >= 0)")]
    InvalidMaxSize(i64),

    /// TTL was negative (value in milliseconds)
    #[error("Invalid ttl: {0}ms (must be >= 0)")]
    InvalidTtl(i64),

    /// Sweeper interval was zero
    #[error("Invalid sweep interval: {0}ms (must be > 0)")]
    InvalidSweepInterval(u64),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

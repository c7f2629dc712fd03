//! Shared Cache Module
//!
//! Thread-safe handle around `CacheStore`. One exclusive lock guards the
//! index, both orderings and the statistics for the full duration of every
//! call, so each operation applies atomically or not at all.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Thread-safe bounded cache with LRU eviction and optional TTL.
///
/// Share between threads with `Arc<LruCache<K, V>>`. Values are returned by
/// clone; nothing inside the cache is ever handed out by reference.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lrucache::LruCache;
///
/// let cache = LruCache::new(2, Duration::ZERO);
/// cache.put("a".to_string(), "1".to_string());
/// cache.put("b".to_string(), "2".to_string());
/// assert_eq!(cache.get("a"), Some("1".to_string()));
///
/// // "b" is now least recently used
/// cache.put("c".to_string(), "3".to_string());
/// assert_eq!(cache.get("b"), None);
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<CacheStore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructors ==
    /// Creates a cache holding at most `max_size` entries (0 = unbounded)
    /// whose entries expire `ttl` after insertion (zero = never).
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheStore::new(max_size, ttl)),
        }
    }

    /// Creates a cache from signed parameters.
    ///
    /// # Errors
    /// - `CacheError::InvalidMaxSize` if `max_size` is negative
    /// - `CacheError::InvalidTtl` if `ttl` is negative
    pub fn try_new(max_size: i64, ttl: chrono::Duration) -> Result<Self> {
        let max_size =
            usize::try_from(max_size).map_err(|_| CacheError::InvalidMaxSize(max_size))?;
        let ttl = ttl
            .to_std()
            .map_err(|_| CacheError::InvalidTtl(ttl.num_milliseconds()))?;
        Ok(Self::new(max_size, ttl))
    }

    /// Creates a cache from a loaded `CacheConfig`.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let max_size = usize::try_from(config.max_size)
            .map_err(|_| CacheError::InvalidMaxSize(config.max_size))?;
        let ttl_ms =
            u64::try_from(config.ttl_ms).map_err(|_| CacheError::InvalidTtl(config.ttl_ms))?;
        Ok(Self::new(max_size, Duration::from_millis(ttl_ms)))
    }

    // == Core Operations ==
    /// Inserts or replaces `key`, evicting at most one entry if the cache
    /// grows past its bound.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Returns a copy of the value for `key` if present and not expired,
    /// marking it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key)
    }

    /// Removes `key`. Returns false if it was not present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().delete(key)
    }

    /// Returns the number of entries held.
    ///
    /// The count may include expired entries that have not been purged yet;
    /// see `live_len` for an exact count of live entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache holds no entries, expired ones included.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    // == Maintenance ==
    /// Returns the number of entries that have not expired.
    pub fn live_len(&self) -> usize {
        self.inner.lock().live_len()
    }

    /// Removes every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    /// Returns all keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Returns the configured entry bound, 0 = unbounded.
    pub fn max_size(&self) -> usize {
        self.inner.lock().max_size()
    }

    /// Returns the configured entry lifetime, zero = never expire.
    pub fn ttl(&self) -> Duration {
        self.inner.lock().ttl()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_accepts_zero() {
        let cache: LruCache<String, String> =
            LruCache::try_new(0, chrono::Duration::zero()).unwrap();
        assert_eq!(cache.max_size(), 0);
        assert_eq!(cache.ttl(), Duration::ZERO);
    }

    #[test]
    fn test_try_new_converts_ttl() {
        let cache: LruCache<String, String> =
            LruCache::try_new(8, chrono::Duration::milliseconds(1500)).unwrap();
        assert_eq!(cache.max_size(), 8);
        assert_eq!(cache.ttl(), Duration::from_millis(1500));
    }

    #[test]
    fn test_try_new_rejects_negative_max_size() {
        let result: Result<LruCache<String, String>> =
            LruCache::try_new(-1, chrono::Duration::zero());
        assert_eq!(result.err(), Some(CacheError::InvalidMaxSize(-1)));
    }

    #[test]
    fn test_try_new_rejects_negative_ttl() {
        let result: Result<LruCache<String, String>> =
            LruCache::try_new(10, chrono::Duration::milliseconds(-100));
        assert_eq!(result.err(), Some(CacheError::InvalidTtl(-100)));
    }

    #[test]
    fn test_from_config() {
        let config = CacheConfig {
            max_size: 16,
            ttl_ms: 250,
            sweep_interval_ms: 1000,
        };
        let cache: LruCache<String, String> = LruCache::from_config(&config).unwrap();
        assert_eq!(cache.max_size(), 16);
        assert_eq!(cache.ttl(), Duration::from_millis(250));
    }

    #[test]
    fn test_from_config_rejects_negative_values() {
        let config = CacheConfig {
            max_size: -3,
            ..CacheConfig::default()
        };
        let result: Result<LruCache<String, String>> = LruCache::from_config(&config);
        assert_eq!(result.err(), Some(CacheError::InvalidMaxSize(-3)));

        let config = CacheConfig {
            ttl_ms: i64::MIN,
            ..CacheConfig::default()
        };
        let result: Result<LruCache<String, String>> = LruCache::from_config(&config);
        assert_eq!(result.err(), Some(CacheError::InvalidTtl(i64::MIN)));
    }

    #[test]
    fn test_concrete_scenario() {
        let cache = LruCache::new(2, Duration::ZERO);
        cache.put("a".to_string(), "1".to_string());
        cache.put("b".to_string(), "2".to_string());

        assert_eq!(cache.get("a"), Some("1".to_string()));
        cache.put("c".to_string(), "3".to_string());

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some("1".to_string()));
        assert_eq!(cache.get("c"), Some("3".to_string()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_cache_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LruCache<String, String>>();
    }
}

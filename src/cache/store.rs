//! Cache Store Module
//!
//! Main cache engine combining a hash index with recency and age ordering.
//! The store itself is not synchronized; `LruCache` wraps it in a lock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::cache::arena::{Arena, Order};
use crate::cache::entry::Entry;
use crate::cache::CacheStats;

/// Upper bound on the index capacity reserved up front
const INITIAL_CAPACITY: usize = 64;

// == Cache Store ==
/// Bounded key-value store with LRU eviction and absolute TTL expiry.
///
/// The index owns the mapping from key to arena slot; the arena holds the
/// entries and both orderings. Every public method leaves the index and the
/// two lists describing exactly the same set of entries.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to arena slot
    index: HashMap<K, usize, RandomState>,
    /// Entries threaded onto the recency and age lists
    arena: Arena<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries, 0 = unbounded
    max_size: usize,
    /// Entry lifetime, zero = never expire
    ttl: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries, 0 for no limit
    /// * `ttl` - Lifetime of each entry from insertion, zero for no expiry
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        let capacity = match max_size {
            0 => INITIAL_CAPACITY,
            n => n.min(INITIAL_CAPACITY),
        };

        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            arena: Arena::with_capacity(capacity),
            stats: CacheStats::new(),
            max_size,
            ttl,
        }
    }

    // == Put ==
    /// Inserts a key-value pair, replacing any existing entry for the key.
    ///
    /// The new entry becomes both the most recently used and the most
    /// recently inserted, and its TTL starts now. If this pushes the cache
    /// over `max_size`, exactly one entry is evicted.
    pub fn put(&mut self, key: K, value: V) {
        let now = Instant::now();

        if let Some(old) = self.index.remove(&key) {
            self.arena.remove(old);
        }

        let idx = self
            .arena
            .insert(Entry::new(key.clone(), value, self.ttl, now));
        self.index.insert(key, idx);
        self.stats.record_insert();
        trace!(slot = idx, len = self.index.len(), "Inserted cache entry");

        self.trim(now);
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    ///
    /// An expired entry is removed on the spot and reported as missing.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();

        let Some(&idx) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let live = self
            .arena
            .get(idx)
            .is_some_and(|entry| !entry.is_expired(now));
        if !live {
            self.index.remove(key);
            self.arena.remove(idx);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(slot = idx, "Dropped expired entry on read");
            return None;
        }

        self.arena.move_to_front(idx, Order::Recency);
        self.stats.record_hit();
        self.arena.get(idx).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes the entry for `key`, expired or not.
    ///
    /// Returns false if the key was not present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.remove(key) {
            Some(idx) => {
                self.arena.remove(idx);
                trace!(slot = idx, len = self.index.len(), "Deleted cache entry");
                true
            }
            None => false,
        }
    }

    // == Length ==
    /// Returns the number of entries held, including expired entries that
    /// have not been observed yet. Use `live_len` for an exact live count.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no entries are held, expired ones included.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Live Length ==
    /// Returns the number of entries that have not expired.
    ///
    /// Age order is also expiry order, so only the expired run at the back of
    /// the age list is visited.
    pub fn live_len(&self) -> usize {
        let now = Instant::now();
        let expired = self
            .arena
            .iter_rev(Order::Age)
            .take_while(|(_, entry)| entry.is_expired(now))
            .count();
        self.index.len() - expired
    }

    // == Purge Expired ==
    /// Removes every expired entry.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        while let Some(idx) = self.arena.back(Order::Age) {
            if !self.is_expired_at(idx, now) {
                break;
            }
            self.evict(idx);
            self.stats.record_expiration();
            removed += 1;
        }

        if removed > 0 {
            debug!(removed, len = self.index.len(), "Purged expired entries");
        }
        removed
    }

    // == Keys ==
    /// Returns all keys from most to least recently used, expired entries
    /// included.
    pub fn keys(&self) -> Vec<K> {
        self.arena
            .iter(Order::Recency)
            .map(|(_, entry)| entry.key.clone())
            .collect()
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.arena.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    /// Returns the configured entry bound, 0 = unbounded.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the configured entry lifetime, zero = never expire.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Trim ==
    /// Evicts at most one entry once the cache has grown past `max_size`.
    ///
    /// The oldest inserted entry goes first if it has expired; otherwise the
    /// least recently used entry is evicted.
    fn trim(&mut self, now: Instant) {
        if self.max_size == 0 || self.index.len() <= self.max_size {
            return;
        }

        if let Some(oldest) = self.arena.back(Order::Age) {
            if self.is_expired_at(oldest, now) {
                self.evict(oldest);
                self.stats.record_expiration();
                debug!(slot = oldest, "Trim reclaimed expired entry");
                return;
            }
        }

        if let Some(lru) = self.arena.back(Order::Recency) {
            self.evict(lru);
            self.stats.record_eviction();
            debug!(slot = lru, "Trim evicted least recently used entry");
        }
    }

    fn is_expired_at(&self, idx: usize, now: Instant) -> bool {
        self.arena
            .get(idx)
            .is_some_and(|entry| entry.is_expired(now))
    }

    /// Removes slot `idx` from the arena and its key from the index.
    fn evict(&mut self, idx: usize) {
        if let Some(entry) = self.arena.remove(idx) {
            self.index.remove(&entry.key);
        }
    }
}

#[cfg(test)]
impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Asserts that the index and both lists agree on the set of entries and
    /// that every list links consistently in both directions.
    pub(crate) fn assert_consistent(&self) {
        use std::collections::HashSet;

        for order in [Order::Recency, Order::Age] {
            let forward: Vec<usize> = self.arena.iter(order).map(|(idx, _)| idx).collect();
            let mut backward: Vec<usize> =
                self.arena.iter_rev(order).map(|(idx, _)| idx).collect();
            backward.reverse();
            assert_eq!(forward, backward, "{order:?} links disagree");
            assert_eq!(forward.len(), self.index.len(), "{order:?} length");

            let unique: HashSet<usize> = forward.iter().copied().collect();
            assert_eq!(unique.len(), forward.len(), "{order:?} has duplicates");

            for (idx, entry) in self.arena.iter(order) {
                assert_eq!(
                    self.index.get(&entry.key),
                    Some(&idx),
                    "{:?} indexed at wrong slot",
                    entry.key
                );
            }
        }

        if self.max_size > 0 {
            assert!(self.index.len() <= self.max_size);
        }
    }
}

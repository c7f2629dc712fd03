//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::fmt;
use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached association and its expiry deadline.
///
/// Entries are never mutated after creation; replacing a value means
/// creating a fresh entry.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// Lookup key
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute expiry deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a new entry inserted at `now`.
    ///
    /// A zero `ttl` means the entry never expires.
    pub fn new(key: K, value: V, ttl: Duration, now: Instant) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };

        Self {
            key,
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired only once `now` is strictly
    /// past its deadline. At the exact deadline instant it is still live.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }
}

/// Formats as `key=value`, followed by the remaining lifetime when the entry
/// carries a deadline.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)?;
        match self.expires_at {
            None => Ok(()),
            Some(expires) => match expires.checked_duration_since(Instant::now()) {
                Some(remaining) => write!(f, " (expires in {:?})", remaining),
                None => write!(f, " (expired)"),
            },
        }
    }
}

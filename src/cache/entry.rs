//! Cache Entry Module
//!
//! Defines the timestamped wrapper every cache tier stores.

// == Cache Entry ==
/// A cached value together with the time it was written.
///
/// The TTL is not stored on the entry: it is fixed per cache tier and
/// supplied by the caller when checking validity.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// The cached payload
    pub value: T,
    /// Creation/refresh timestamp (Unix milliseconds)
    pub cached_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Wraps a value, stamping it with `now`.
    pub fn wrap(value: T, now: u64) -> Self {
        Self {
            value,
            cached_at: now,
        }
    }

    // == Is Valid ==
    /// Checks whether the entry is still fresh.
    ///
    /// Boundary condition: an entry cached at `t0` is valid for every
    /// `now` in `[t0, t0 + ttl)` and invalid once `now >= t0 + ttl`.
    /// A clock reading earlier than `cached_at` counts as age zero.
    pub fn is_valid(&self, now: u64, ttl_ms: u64) -> bool {
        self.age_ms(now) < ttl_ms
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was written.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.cached_at)
    }
}

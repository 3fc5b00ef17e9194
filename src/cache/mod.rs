//! Cache Module
//!
//! Cache tiers and their building blocks: TTL entries, the aggregate
//! snapshot cache, the bounded entity lookup cache, LRU tracking,
//! statistics and in-flight request deduplication.

mod aggregate;
mod clock;
mod entry;
mod inflight;
mod lookup;
mod lru;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use aggregate::{AggregateCache, ResourceKey, Snapshot};
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use inflight::SingleFlight;
pub use lookup::EntityLookupCache;
pub use lru::LruTracker;
pub use stats::CacheStats;

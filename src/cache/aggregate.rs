//! Aggregate Cache Module
//!
//! Keyed storage for whole-resource snapshots: the dashboard summary and the
//! page-1 state of each collection.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats};
use crate::collection::CollectionState;
use crate::error::ApiError;
use crate::models::{DashboardSnapshot, Order, Product, User};

// == Resource Key ==
/// Aggregate cache keys, one per remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKey {
    Dashboard,
    Orders,
    Users,
    Products,
}

impl ResourceKey {
    pub const ALL: [ResourceKey; 4] = [
        ResourceKey::Dashboard,
        ResourceKey::Orders,
        ResourceKey::Users,
        ResourceKey::Products,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKey::Dashboard => "dashboard",
            ResourceKey::Orders => "orders",
            ResourceKey::Users => "users",
            ResourceKey::Products => "products",
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKey {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ApiError::InvalidRequest(format!("Unknown cache key '{}'", s)))
    }
}

// == Snapshot ==
/// A cached whole-resource value.
#[derive(Debug, Clone)]
pub enum Snapshot {
    Dashboard(Arc<DashboardSnapshot>),
    Orders(Arc<CollectionState<Order>>),
    Users(Arc<CollectionState<User>>),
    Products(Arc<CollectionState<Product>>),
}

impl Snapshot {
    /// The key this snapshot belongs under.
    pub fn key(&self) -> ResourceKey {
        match self {
            Snapshot::Dashboard(_) => ResourceKey::Dashboard,
            Snapshot::Orders(_) => ResourceKey::Orders,
            Snapshot::Users(_) => ResourceKey::Users,
            Snapshot::Products(_) => ResourceKey::Products,
        }
    }
}

// == Aggregate Cache ==
/// Snapshot storage with lazy TTL expiry.
///
/// Stale entries are never swept: they stay in place until the next read
/// treats them as absent, or until they are refreshed or invalidated.
#[derive(Debug)]
pub struct AggregateCache {
    entries: HashMap<ResourceKey, CacheEntry<Snapshot>>,
    /// Freshness window for every aggregate entry
    ttl_ms: u64,
    /// Bumped whenever an entry is dropped or bypassed, so fetches started
    /// before that point can tell their result is outdated
    generations: HashMap<ResourceKey, u64>,
    stats: CacheStats,
}

impl AggregateCache {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
            generations: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    // == Get ==
    /// Returns the raw entry, fresh or stale. Never performs I/O and does not
    /// touch statistics; validity is for the caller to check.
    pub fn get(&self, key: ResourceKey) -> Option<&CacheEntry<Snapshot>> {
        self.entries.get(&key)
    }

    // == Get Valid ==
    /// Returns the snapshot if present and fresh at `now`, recording a hit or
    /// a miss. A stale entry counts as a miss and is left in place.
    pub fn get_valid(&mut self, key: ResourceKey, now: u64) -> Option<Snapshot> {
        match self.entries.get(&key) {
            Some(entry) if entry.is_valid(now, self.ttl_ms) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores a snapshot stamped with `now`, replacing any previous entry.
    pub fn put(&mut self, key: ResourceKey, value: Snapshot, now: u64) -> &CacheEntry<Snapshot> {
        debug_assert_eq!(key, value.key(), "snapshot stored under a foreign key");
        self.entries.insert(key, CacheEntry::wrap(value, now));
        self.stats.set_total_entries(self.entries.len());
        &self.entries[&key]
    }

    // == Generations ==
    pub fn generation(&self, key: ResourceKey) -> u64 {
        self.generations.get(&key).copied().unwrap_or(0)
    }

    /// Starts a new generation for `key`. Returns the new value.
    pub fn bump_generation(&mut self, key: ResourceKey) -> u64 {
        let generation = self.generations.entry(key).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Stores `value` only if no invalidation happened since `generation`
    /// was read. Returns whether it was stored.
    pub fn put_if_current(
        &mut self,
        key: ResourceKey,
        value: Snapshot,
        now: u64,
        generation: u64,
    ) -> bool {
        if self.generation(key) != generation {
            return false;
        }
        self.put(key, value, now);
        true
    }

    // == Invalidate ==
    /// Drops one entry and starts a new generation for its key. Returns
    /// whether an entry was present.
    pub fn invalidate(&mut self, key: ResourceKey) -> bool {
        self.bump_generation(key);
        let removed = self.entries.remove(&key).is_some();
        if removed {
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Drops every entry and starts a new generation for every key.
    /// Returns the number removed.
    pub fn clear(&mut self) -> usize {
        for key in ResourceKey::ALL {
            self.bump_generation(key);
        }
        let count = self.entries.len();
        self.entries.clear();
        self.stats.record_invalidations(count);
        self.stats.set_total_entries(0);
        count
    }

    pub fn contains(&self, key: ResourceKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

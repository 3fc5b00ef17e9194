//! Entity Lookup Cache Module
//!
//! Per-id memoization of single entities, bounded by LRU capacity.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Entity Lookup Cache ==
/// Point-lookup memoizer keyed by entity id.
///
/// Never paginated. Failed lookups are never stored here.
#[derive(Debug)]
pub struct EntityLookupCache<K, T> {
    entries: HashMap<K, CacheEntry<Arc<T>>>,
    lru: LruTracker<K>,
    stats: CacheStats,
    /// Maximum number of ids held at once
    capacity: usize,
    ttl_ms: u64,
}

impl<K, T> EntityLookupCache<K, T>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// # Arguments
    /// * `capacity` - Maximum number of entities (at least 1)
    /// * `ttl_ms` - Freshness window for each entity
    pub fn new(capacity: usize, ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            ttl_ms,
        }
    }

    // == Get Valid ==
    /// Returns the entity if cached and fresh at `now`.
    ///
    /// A hit marks the id as most recently used. A stale entry is a miss and
    /// is left for the next insert to overwrite.
    pub fn get_valid(&mut self, id: &K, now: u64) -> Option<Arc<T>> {
        match self.entries.get(id) {
            Some(entry) if entry.is_valid(now, self.ttl_ms) => {
                let value = Arc::clone(&entry.value);
                self.stats.record_hit();
                self.lru.touch(id);
                Some(value)
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a freshly fetched entity, overwriting any previous entry.
    ///
    /// If the cache is at capacity and the id is new, the least recently
    /// used entity is evicted first.
    pub fn insert(&mut self, id: K, value: Arc<T>, now: u64) {
        let is_overwrite = self.entries.contains_key(&id);

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(id.clone(), CacheEntry::wrap(value, now));
        self.lru.touch(&id);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    pub fn remove(&mut self, id: &K) -> bool {
        let removed = self.entries.remove(id).is_some();
        if removed {
            self.lru.remove(id);
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Empties the cache. Returns the number of entities dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.record_invalidations(count);
        self.stats.set_total_entries(0);
        count
    }

    // == Sweep Expired ==
    /// Removes every entry stale at `now`. Returns the number removed.
    pub fn sweep_expired(&mut self, now: u64) -> usize {
        let ttl_ms = self.ttl_ms;
        let expired: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_valid(now, ttl_ms))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            self.entries.remove(id);
            self.lru.remove(id);
        }

        self.stats.record_invalidations(expired.len());
        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

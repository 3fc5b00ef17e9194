//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache invariants over arbitrary inputs.

use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::cache::{AggregateCache, CacheEntry, EntityLookupCache, ResourceKey, Snapshot};
use crate::client::mock::order;
use crate::collection::{derive_counts, CollectionState};
use crate::models::{DashboardSnapshot, Order, Page};

// == Strategies ==
#[derive(Debug, Clone)]
enum LookupOp {
    Insert(u64),
    Get(u64),
}

fn lookup_op_strategy() -> impl Strategy<Value = LookupOp> {
    prop_oneof![
        (0u64..20).prop_map(LookupOp::Insert),
        (0u64..20).prop_map(LookupOp::Get),
    ]
}

fn resource_key_strategy() -> impl Strategy<Value = ResourceKey> {
    prop::sample::select(ResourceKey::ALL.to_vec())
}

fn snapshot_for(key: ResourceKey) -> Snapshot {
    match key {
        ResourceKey::Dashboard => Snapshot::Dashboard(Arc::new(DashboardSnapshot::default())),
        ResourceKey::Orders => Snapshot::Orders(Arc::new(CollectionState::new(25))),
        ResourceKey::Users => Snapshot::Users(Arc::new(CollectionState::new(25))),
        ResourceKey::Products => Snapshot::Products(Arc::new(CollectionState::new(25))),
    }
}

fn status_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["pending", "paid", "shipped", ""])
}

/// Pages of orders with globally increasing ids.
fn pages_strategy() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    prop::collection::vec(prop::collection::vec(status_strategy(), 0..8), 1..6)
}

fn build_pages(statuses: &[Vec<&'static str>]) -> Vec<Vec<Order>> {
    let mut next_id = 1;
    statuses
        .iter()
        .map(|page| {
            page.iter()
                .map(|status| {
                    let o = order(next_id, status);
                    next_id += 1;
                    o
                })
                .collect()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // An entry written at t0 is valid exactly for t in [t0, t0 + ttl).
    #[test]
    fn prop_ttl_validity_window(
        t0 in 0u64..1_000_000_000_000,
        ttl in 1u64..10_000_000,
        offset in 0u64..20_000_000,
    ) {
        let entry = CacheEntry::wrap((), t0);
        prop_assert_eq!(entry.is_valid(t0 + offset, ttl), offset < ttl);
    }

    // Reads before the write time never count as stale.
    #[test]
    fn prop_clock_skew_is_fresh(t0 in 1u64..1_000_000, back in 0u64..1_000_000, ttl in 1u64..1000) {
        let entry = CacheEntry::wrap((), t0);
        prop_assert!(entry.is_valid(t0.saturating_sub(back), ttl));
    }

    // The lookup cache never exceeds capacity and evicts in LRU order,
    // matching a simple model, with accurate hit/miss/eviction counts.
    #[test]
    fn prop_lookup_capacity_and_lru_order(
        capacity in 1usize..8,
        ops in prop::collection::vec(lookup_op_strategy(), 1..80),
    ) {
        let mut cache: EntityLookupCache<u64, u64> = EntityLookupCache::new(capacity, u64::MAX);
        let mut model: VecDeque<u64> = VecDeque::new();
        let (mut hits, mut misses, mut evictions) = (0u64, 0u64, 0u64);

        for op in ops {
            match op {
                LookupOp::Insert(id) => {
                    if !model.contains(&id) && model.len() >= capacity {
                        model.pop_back();
                        evictions += 1;
                    }
                    model.retain(|k| *k != id);
                    model.push_front(id);
                    cache.insert(id, Arc::new(id), 0);
                }
                LookupOp::Get(id) => {
                    let found = cache.get_valid(&id, 0);
                    if model.contains(&id) {
                        hits += 1;
                        prop_assert_eq!(found.as_deref(), Some(&id));
                        model.retain(|k| *k != id);
                        model.push_front(id);
                    } else {
                        misses += 1;
                        prop_assert!(found.is_none());
                    }
                }
            }

            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), model.len());
            for id in &model {
                prop_assert!(cache.contains(id));
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.evictions, evictions);
    }

    // Sweeping removes exactly the stale entries.
    #[test]
    fn prop_sweep_removes_only_stale(
        stamps in prop::collection::vec(0u64..10_000, 1..20),
        now in 0u64..20_000,
    ) {
        let ttl = 5_000;
        let mut cache: EntityLookupCache<u64, ()> = EntityLookupCache::new(100, ttl);
        for (id, stamp) in stamps.iter().enumerate() {
            cache.insert(id as u64, Arc::new(()), *stamp);
        }

        let stale = stamps.iter().filter(|s| now.saturating_sub(**s) >= ttl).count();
        prop_assert_eq!(cache.sweep_expired(now), stale);
        prop_assert_eq!(cache.len(), stamps.len() - stale);
    }

    // Invalidating one aggregate key never touches the others.
    #[test]
    fn prop_invalidate_scope(
        mask in prop::collection::vec(any::<bool>(), 4),
        target in resource_key_strategy(),
    ) {
        let populated: HashSet<ResourceKey> = ResourceKey::ALL
            .into_iter()
            .zip(mask)
            .filter_map(|(key, keep)| keep.then_some(key))
            .collect();
        let mut cache = AggregateCache::new(60_000);
        for key in &populated {
            cache.put(*key, snapshot_for(*key), 0);
        }

        let removed = cache.invalidate(target);

        prop_assert_eq!(removed, populated.contains(&target));
        for key in ResourceKey::ALL {
            let expected = populated.contains(&key) && key != target;
            prop_assert_eq!(cache.contains(key), expected);
        }
    }

    // `has_more` is true only for a full, non-empty page below the total.
    #[test]
    fn prop_has_more_heuristic(
        page_size in 1u32..50,
        returned in 0u32..60,
        total in prop::option::of(0u64..100),
    ) {
        let returned = returned.min(page_size);
        let items: Vec<Order> = (1..=returned as u64).map(|id| order(id, "paid")).collect();
        let mut state = CollectionState::new(page_size);

        state.apply_page(1, Page::new(items, total), 0);

        let full = returned > 0 && returned == page_size;
        let reached = total.is_some_and(|t| returned as u64 >= t);
        prop_assert_eq!(state.cursor.has_more, full && !reached);
    }

    // Later pages append in order; derived counts stay those of page 1.
    #[test]
    fn prop_append_order_and_stale_counts(statuses in pages_strategy()) {
        let pages = build_pages(&statuses);
        let mut state = CollectionState::new(8);

        for (index, page) in pages.iter().enumerate() {
            state.apply_page(index as u32 + 1, Page::new(page.clone(), None), 0);
        }

        let expected: Vec<u64> = pages.iter().flatten().map(|o| o.id).collect();
        let actual: Vec<u64> = state.items.iter().map(|o| o.id).collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(&state.derived_counts, &derive_counts(&pages[0]));

        let distinct: HashSet<u64> = state.items.iter().map(|o| o.id).collect();
        prop_assert_eq!(distinct.len(), state.items.len());
    }
}

//! Invalidation Controller
//!
//! Explicit per-key invalidation, global clear, and the hook every mutation
//! calls after it succeeds so the next read goes past the cache.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{AggregateCache, ResourceKey};
use crate::lookup::EntityResolver;
use crate::models::{Product, User};

/// State-changing operations and the aggregates they make stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    OrderStatus { order_id: u64 },
}

impl Mutation {
    pub fn affected(&self) -> &'static [ResourceKey] {
        match self {
            Mutation::OrderStatus { .. } => &[ResourceKey::Orders],
        }
    }
}

#[derive(Clone)]
pub struct InvalidationController {
    aggregate: Arc<RwLock<AggregateCache>>,
    users: EntityResolver<User>,
    products: EntityResolver<Product>,
}

impl InvalidationController {
    pub fn new(
        aggregate: Arc<RwLock<AggregateCache>>,
        users: EntityResolver<User>,
        products: EntityResolver<Product>,
    ) -> Self {
        Self {
            aggregate,
            users,
            products,
        }
    }

    // == Invalidate ==
    /// Drops one aggregate entry. Other keys and the lookup caches are left
    /// alone. Returns whether an entry was present.
    pub async fn invalidate(&self, key: ResourceKey) -> bool {
        let removed = self.aggregate.write().await.invalidate(key);
        info!(key = %key, removed, "aggregate invalidated");
        removed
    }

    // == Clear All ==
    /// Drops every aggregate entry and empties both lookup caches. Returns
    /// the total number of entries dropped.
    pub async fn clear_all(&self) -> usize {
        let aggregates = self.aggregate.write().await.clear();
        let users = self.users.clear().await;
        let products = self.products.clear().await;
        info!(aggregates, users, products, "all caches cleared");
        aggregates + users + products
    }

    // == After Mutation ==
    /// Invalidates everything `mutation` affects. Returns the number of
    /// entries that were present.
    pub async fn after_mutation(&self, mutation: Mutation) -> usize {
        let mut aggregate = self.aggregate.write().await;
        let removed = mutation
            .affected()
            .iter()
            .filter(|key| aggregate.invalidate(**key))
            .count();
        info!(?mutation, removed, "invalidated after mutation");
        removed
    }
}

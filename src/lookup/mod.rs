//! Entity lookups
//!
//! Resolves single entities by id through the bounded lookup cache, used to
//! decorate list rows with foreign records.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, Clock, EntityLookupCache, SingleFlight};
use crate::client::AdminApi;
use crate::error::{ApiError, Result};
use crate::models::{Product, User};

/// A record type resolvable by id.
pub trait Entity: Send + Sync + Sized + 'static {
    /// Name used in logs
    const KIND: &'static str;

    fn fetch_by_id(api: Arc<dyn AdminApi>, id: u64) -> BoxFuture<'static, Result<Self>>;
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn fetch_by_id(api: Arc<dyn AdminApi>, id: u64) -> BoxFuture<'static, Result<Self>> {
        async move { api.user(id).await }.boxed()
    }
}

impl Entity for Product {
    const KIND: &'static str = "product";

    fn fetch_by_id(api: Arc<dyn AdminApi>, id: u64) -> BoxFuture<'static, Result<Self>> {
        async move { api.product(id).await }.boxed()
    }
}

// == Entity Resolver ==
/// Memoizing point lookup for one entity type. Clones share the cache.
pub struct EntityResolver<T: Entity> {
    inner: Arc<ResolverInner<T>>,
}

struct ResolverInner<T: Entity> {
    api: Arc<dyn AdminApi>,
    clock: Arc<dyn Clock>,
    cache: RwLock<EntityLookupCache<u64, T>>,
    inflight: SingleFlight<u64, Option<Arc<T>>>,
}

impl<T: Entity> Clone for EntityResolver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> EntityResolver<T> {
    pub fn new(
        api: Arc<dyn AdminApi>,
        clock: Arc<dyn Clock>,
        capacity: usize,
        ttl_ms: u64,
    ) -> Self {
        Self {
            inner: Arc::new(ResolverInner {
                api,
                clock,
                cache: RwLock::new(EntityLookupCache::new(capacity, ttl_ms)),
                inflight: SingleFlight::new(),
            }),
        }
    }

    // == Get By Id ==
    /// Returns the entity, from cache while fresh, otherwise with one remote
    /// call. Failures yield `None` and are not cached, so the next call
    /// retries.
    pub async fn get_by_id(&self, id: u64) -> Option<Arc<T>> {
        let now = self.inner.clock.now_ms();
        if let Some(hit) = self.inner.cache.write().await.get_valid(&id, now) {
            return Some(hit);
        }

        let inner = Arc::clone(&self.inner);
        self.inner.inflight.run(id, move || inner.fetch(id)).await
    }

    /// Resolves a batch of ids, one lookup per distinct id.
    pub async fn get_many<I>(&self, ids: I) -> HashMap<u64, Arc<T>>
    where
        I: IntoIterator<Item = u64>,
    {
        let distinct: BTreeSet<u64> = ids.into_iter().collect();
        let lookups = distinct.into_iter().map(|id| async move {
            self.get_by_id(id).await.map(|entity| (id, entity))
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Empties the cache. Returns the number of entries dropped.
    pub async fn clear(&self) -> usize {
        self.inner.cache.write().await.clear()
    }

    /// Drops entries that are already stale.
    pub async fn sweep_expired(&self) -> usize {
        let now = self.inner.clock.now_ms();
        self.inner.cache.write().await.sweep_expired(now)
    }

    pub async fn contains(&self, id: u64) -> bool {
        self.inner.cache.read().await.contains(&id)
    }

    pub async fn len(&self) -> usize {
        self.inner.cache.read().await.len()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.cache.read().await.stats()
    }
}

impl<T: Entity> ResolverInner<T> {
    async fn fetch(self: Arc<Self>, id: u64) -> Option<Arc<T>> {
        match T::fetch_by_id(Arc::clone(&self.api), id).await {
            Ok(entity) => {
                let entity = Arc::new(entity);
                let now = self.clock.now_ms();
                self.cache.write().await.insert(id, Arc::clone(&entity), now);
                debug!(kind = T::KIND, id, "entity cached");
                Some(entity)
            }
            Err(ApiError::NotFound(msg)) => {
                debug!(kind = T::KIND, id, %msg, "entity not found");
                None
            }
            Err(err) => {
                warn!(kind = T::KIND, id, error = %err, "entity lookup failed");
                None
            }
        }
    }
}

//! Paginated Collection Fetcher
//!
//! Fetches one page of one collection, merges it into the live state and
//! keeps the page-1 snapshot in the aggregate cache.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{CollectionState, Paginated};
use crate::cache::{AggregateCache, Clock, SingleFlight};
use crate::client::{AdminApi, PageRequest};
use crate::error::{ApiError, Result};

type FetchResult<T> = Result<Arc<CollectionState<T>>>;

// == Collection Fetcher ==
/// Cursor/page state machine for one collection. Cheap to clone; clones
/// share state.
pub struct CollectionFetcher<T: Paginated> {
    inner: Arc<FetcherInner<T>>,
}

struct FetcherInner<T: Paginated> {
    api: Arc<dyn AdminApi>,
    aggregate: Arc<RwLock<AggregateCache>>,
    clock: Arc<dyn Clock>,
    state: RwLock<CollectionState<T>>,
    /// In-flight fetches keyed by page number and cache generation
    inflight: SingleFlight<(u32, u64), FetchResult<T>>,
    page_size: u32,
}

impl<T: Paginated> Clone for CollectionFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Paginated> CollectionFetcher<T> {
    pub fn new(
        api: Arc<dyn AdminApi>,
        aggregate: Arc<RwLock<AggregateCache>>,
        clock: Arc<dyn Clock>,
        page_size: u32,
    ) -> Self {
        Self {
            inner: Arc::new(FetcherInner {
                api,
                aggregate,
                clock,
                state: RwLock::new(CollectionState::new(page_size)),
                inflight: SingleFlight::new(),
                page_size,
            }),
        }
    }

    // == Fetch Page ==
    /// Fetches `page` and merges it into the collection.
    ///
    /// Page 1 is served from the aggregate cache while fresh, unless
    /// `force_refresh` is set. Any later page must be the one right after the
    /// current cursor. On failure the error is recorded on the state and
    /// returned; items and the cached snapshot are left as they were.
    pub async fn fetch_page(&self, page: u32, force_refresh: bool) -> FetchResult<T> {
        if page == 0 {
            return Err(ApiError::InvalidRequest("Page numbers start at 1".to_string()));
        }

        if page == 1 && !force_refresh {
            if let Some(cached) = self.cached_first_page().await {
                debug!(resource = %T::RESOURCE, "page 1 served from cache");
                let mut state = self.inner.state.write().await;
                // A later page may still be loading
                let loading = state.loading;
                *state = (*cached).clone();
                state.loading = loading;
                return Ok(cached);
            }
        }

        if page > 1 {
            let state = self.inner.state.read().await;
            if !state.is_loaded() {
                return Err(ApiError::InvalidRequest(format!(
                    "Load page 1 of {} before page {}",
                    T::RESOURCE,
                    page
                )));
            }
            if page != state.cursor.page + 1 {
                return Err(ApiError::InvalidRequest(format!(
                    "Page {} of {} does not follow current page {}",
                    page,
                    T::RESOURCE,
                    state.cursor.page
                )));
            }
        }

        // A forced refresh must not join a fetch that started earlier
        let generation = {
            let mut aggregate = self.inner.aggregate.write().await;
            if force_refresh {
                aggregate.bump_generation(T::RESOURCE)
            } else {
                aggregate.generation(T::RESOURCE)
            }
        };

        let inner = Arc::clone(&self.inner);
        self.inner
            .inflight
            .run((page, generation), move || inner.load(page, generation))
            .await
    }

    // == Load More ==
    /// Fetches the page after the cursor.
    ///
    /// Loads page 1 if nothing is loaded yet; returns the current state
    /// without a network call when the cursor reports no more pages.
    pub async fn load_more(&self) -> FetchResult<T> {
        let (loaded, has_more, page) = {
            let state = self.inner.state.read().await;
            (state.is_loaded(), state.cursor.has_more, state.cursor.page)
        };

        if !loaded {
            return self.fetch_page(1, false).await;
        }
        if !has_more {
            debug!(resource = %T::RESOURCE, page, "no more pages");
            return Ok(Arc::new(self.state().await));
        }
        self.fetch_page(page + 1, false).await
    }

    /// Snapshot of the live collection state.
    pub async fn state(&self) -> CollectionState<T> {
        self.inner.state.read().await.clone()
    }

    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    async fn cached_first_page(&self) -> Option<Arc<CollectionState<T>>> {
        let now = self.inner.clock.now_ms();
        let snapshot = self
            .inner
            .aggregate
            .write()
            .await
            .get_valid(T::RESOURCE, now)?;
        T::from_snapshot(&snapshot)
    }
}

impl<T: Paginated> FetcherInner<T> {
    /// One remote call for `page`, then merge and (page 1 only) cache write.
    ///
    /// The cache write is skipped when the resource was invalidated or
    /// force-refreshed after `generation` was read.
    async fn load(self: Arc<Self>, page: u32, generation: u64) -> FetchResult<T> {
        self.state.write().await.loading = true;

        let request = PageRequest {
            page,
            limit: self.page_size,
            summary: page == 1 && T::SUMMARY,
        };
        info!(resource = %T::RESOURCE, page, "fetching page from backend");

        match T::fetch_page(Arc::clone(&self.api), request).await {
            Ok(result) => {
                let now = self.clock.now_ms();
                let snapshot = {
                    let mut state = self.state.write().await;
                    state.apply_page(page, result, now);
                    Arc::new(state.clone())
                };

                // Later pages are transient accumulation and never cached
                if page == 1 {
                    let stored = self.aggregate.write().await.put_if_current(
                        T::RESOURCE,
                        T::into_snapshot(Arc::clone(&snapshot)),
                        now,
                        generation,
                    );
                    if !stored {
                        debug!(resource = %T::RESOURCE, "outdated page 1 not cached");
                    }
                }

                debug!(
                    resource = %T::RESOURCE,
                    page,
                    items = snapshot.items.len(),
                    has_more = snapshot.cursor.has_more,
                    "page merged"
                );
                Ok(snapshot)
            }
            Err(err) => {
                warn!(resource = %T::RESOURCE, page, error = %err, "page fetch failed");
                self.state.write().await.record_failure(&err);
                Err(err)
            }
        }
    }
}

//! Binding of each paginated record type to its backend endpoint and cache key.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;

use super::CollectionState;
use crate::cache::{ResourceKey, Snapshot};
use crate::client::{AdminApi, PageRequest};
use crate::error::Result;
use crate::models::{Order, Page, Product, User};

/// A record type served as a paginated collection.
pub trait Paginated: Clone + Send + Sync + Serialize + 'static {
    /// Aggregate cache key of the collection
    const RESOURCE: ResourceKey;

    /// Whether page-1 requests also ask for summary data
    const SUMMARY: bool = false;

    /// Label `derived_counts` groups by.
    fn group_label(&self) -> Option<&str>;

    fn fetch_page(api: Arc<dyn AdminApi>, request: PageRequest)
        -> BoxFuture<'static, Result<Page<Self>>>;

    fn into_snapshot(state: Arc<CollectionState<Self>>) -> Snapshot;

    fn from_snapshot(snapshot: &Snapshot) -> Option<Arc<CollectionState<Self>>>;
}

impl Paginated for Order {
    const RESOURCE: ResourceKey = ResourceKey::Orders;
    const SUMMARY: bool = true;

    fn group_label(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn fetch_page(
        api: Arc<dyn AdminApi>,
        request: PageRequest,
    ) -> BoxFuture<'static, Result<Page<Self>>> {
        async move { api.orders_page(request).await }.boxed()
    }

    fn into_snapshot(state: Arc<CollectionState<Self>>) -> Snapshot {
        Snapshot::Orders(state)
    }

    fn from_snapshot(snapshot: &Snapshot) -> Option<Arc<CollectionState<Self>>> {
        match snapshot {
            Snapshot::Orders(state) => Some(Arc::clone(state)),
            _ => None,
        }
    }
}

impl Paginated for User {
    const RESOURCE: ResourceKey = ResourceKey::Users;

    fn group_label(&self) -> Option<&str> {
        self.role.as_deref()
    }

    fn fetch_page(
        api: Arc<dyn AdminApi>,
        request: PageRequest,
    ) -> BoxFuture<'static, Result<Page<Self>>> {
        async move { api.users_page(request).await }.boxed()
    }

    fn into_snapshot(state: Arc<CollectionState<Self>>) -> Snapshot {
        Snapshot::Users(state)
    }

    fn from_snapshot(snapshot: &Snapshot) -> Option<Arc<CollectionState<Self>>> {
        match snapshot {
            Snapshot::Users(state) => Some(Arc::clone(state)),
            _ => None,
        }
    }
}

impl Paginated for Product {
    const RESOURCE: ResourceKey = ResourceKey::Products;

    fn group_label(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn fetch_page(
        api: Arc<dyn AdminApi>,
        request: PageRequest,
    ) -> BoxFuture<'static, Result<Page<Self>>> {
        async move { api.products_page(request).await }.boxed()
    }

    fn into_snapshot(state: Arc<CollectionState<Self>>) -> Snapshot {
        Snapshot::Products(state)
    }

    fn from_snapshot(snapshot: &Snapshot) -> Option<Arc<CollectionState<Self>>> {
        match snapshot {
            Snapshot::Products(state) => Some(Arc::clone(state)),
            _ => None,
        }
    }
}

//! Transport to the storefront admin backend.
//!
//! The cache layer only talks to the backend through [`AdminApi`]; the
//! `reqwest` implementation is [`HttpAdminApi`].

mod http;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DashboardSnapshot, Order, Page, Product, User};

pub use http::HttpAdminApi;

/// Parameters of one collection page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    /// Ask the backend for summary data as well (page 1 of orders)
    pub summary: bool,
}

/// The remote admin API as the cache layer consumes it.
///
/// Every call is one remote read (or write); implementations must not cache.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardSnapshot>;

    async fn orders_page(&self, request: PageRequest) -> Result<Page<Order>>;

    async fn users_page(&self, request: PageRequest) -> Result<Page<User>>;

    async fn products_page(&self, request: PageRequest) -> Result<Page<Product>>;

    async fn user(&self, id: u64) -> Result<User>;

    async fn product(&self, id: u64) -> Result<Product>;

    async fn update_order_status(&self, id: u64, status: &str) -> Result<Order>;
}

//! Storefront Cache - a client-side data-access cache for a storefront admin API
//!
//! Serves dashboard and collection aggregates with TTL expiry, tracks
//! pagination, memoizes single-entity lookups and invalidates after mutations.

pub mod api;
pub mod cache;
pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod invalidation;
pub mod lookup;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::ResourceKey;
pub use client::{AdminApi, HttpAdminApi, PageRequest};
pub use config::Config;
pub use error::{ApiError, Result};
pub use service::AdminCache;
pub use tasks::spawn_sweep_task;

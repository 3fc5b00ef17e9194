//! Data models for the cache layer
//!
//! - `domain`: records served by the admin backend
//! - `wire`: backend response envelopes and the normalized page type
//! - `requests` / `responses`: gateway request and response bodies

pub mod domain;
pub mod requests;
pub mod responses;
pub mod wire;

// Re-export commonly used types
pub use domain::{DashboardSnapshot, Order, OrderRow, Product, User};
pub use requests::{PageQuery, RefreshQuery, StatusUpdateRequest};
pub use responses::{
    ClearResponse, ErrorResponse, HealthResponse, InvalidateResponse, StatsResponse,
};
pub use wire::Page;

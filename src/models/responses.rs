//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `GET /stats`, one block per cache tier.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub aggregate: CacheStats,
    pub users: CacheStats,
    pub products: CacheStats,
    /// Hit rate across all tiers
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(aggregate: CacheStats, users: CacheStats, products: CacheStats) -> Self {
        let combined = CacheStats {
            hits: aggregate.hits + users.hits + products.hits,
            misses: aggregate.misses + users.misses + products.misses,
            ..CacheStats::default()
        };
        Self {
            hit_rate: combined.hit_rate(),
            aggregate,
            users,
            products,
        }
    }
}

/// Response body for `DELETE /cache/:key`.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub key: String,
    /// Whether an entry was actually present
    pub removed: bool,
}

impl InvalidateResponse {
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' invalidated", key),
            key,
            removed,
        }
    }
}

/// Response body for `DELETE /cache`.
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Aggregate entries plus lookup entries dropped
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            message: format!("Cleared {} cached entries", removed),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

//! Configuration Module
//!
//! Handles loading the cache layer configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Fixed number of items requested per collection page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Default TTL in seconds shared by the aggregate and lookup tiers.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Cache layer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the storefront admin backend
    pub api_base_url: String,
    /// Optional bearer token sent with every backend request
    pub api_token: Option<String>,
    /// TTL in seconds for aggregate snapshots (dashboard, page 1 of collections)
    pub aggregate_ttl: u64,
    /// TTL in seconds for single-entity lookups
    pub lookup_ttl: u64,
    /// Items per collection page
    pub page_size: u32,
    /// Maximum number of entries held by each lookup cache
    pub lookup_capacity: usize,
    /// Interval in seconds between lookup sweeps, 0 disables the sweep
    pub sweep_interval: u64,
    /// Gateway HTTP port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ADMIN_API_URL` - Backend base URL (default: http://localhost:8000)
    /// - `ADMIN_API_TOKEN` - Bearer token (default: unset)
    /// - `AGGREGATE_TTL` - Aggregate TTL in seconds (default: 300)
    /// - `LOOKUP_TTL` - Lookup TTL in seconds (default: 300)
    /// - `PAGE_SIZE` - Items per page (default: 25)
    /// - `LOOKUP_CAPACITY` - Entries per lookup cache (default: 1000)
    /// - `SWEEP_INTERVAL` - Lookup sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - Gateway port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: env::var("ADMIN_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_token: env::var("ADMIN_API_TOKEN").ok().filter(|v| !v.is_empty()),
            aggregate_ttl: parse_var("AGGREGATE_TTL").unwrap_or(defaults.aggregate_ttl),
            lookup_ttl: parse_var("LOOKUP_TTL").unwrap_or(defaults.lookup_ttl),
            page_size: parse_var("PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            lookup_capacity: parse_var("LOOKUP_CAPACITY")
                .filter(|cap| *cap > 0)
                .unwrap_or(defaults.lookup_capacity),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Aggregate TTL in milliseconds.
    pub fn aggregate_ttl_ms(&self) -> u64 {
        self.aggregate_ttl.saturating_mul(1000)
    }

    /// Lookup TTL in milliseconds.
    pub fn lookup_ttl_ms(&self) -> u64 {
        self.lookup_ttl.saturating_mul(1000)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            api_token: None,
            aggregate_ttl: DEFAULT_TTL_SECS,
            lookup_ttl: DEFAULT_TTL_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            lookup_capacity: 1000,
            sweep_interval: 60,
            server_port: 3000,
        }
    }
}

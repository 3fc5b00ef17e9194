//! Request DTOs for the gateway API
//!
//! Defines query strings and bodies accepted from consumers.

use serde::Deserialize;

/// Query string for collection reads (`GET /orders?page=2&refresh=true`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Page number, defaults to 1
    #[serde(default)]
    pub page: Option<u32>,
    /// Bypass the cache for page 1
    #[serde(default)]
    pub refresh: bool,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

/// Query string for aggregate reads (`GET /dashboard?refresh=true`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

/// Request body for `PUT /orders/:id/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl StatusUpdateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.status.trim().is_empty() {
            return Some("Status cannot be empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page(), 1);
        assert!(!query.refresh);
    }

    #[test]
    fn test_page_query_explicit() {
        let query: PageQuery = serde_json::from_str(r#"{"page": 3, "refresh": true}"#).unwrap();
        assert_eq!(query.page(), 3);
        assert!(query.refresh);
    }

    #[test]
    fn test_validate_empty_status() {
        let req = StatusUpdateRequest {
            status: "  ".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_status() {
        let req = StatusUpdateRequest {
            status: "shipped".to_string(),
        };
        assert!(req.validate().is_none());
    }
}

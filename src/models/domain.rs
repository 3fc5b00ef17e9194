//! Records served by the storefront admin backend.
//!
//! Only the fields the cache layer reasons about are typed; everything else
//! the backend sends is kept in `extra` so consumers see the full payload.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An order row from `GET /admin/get_all_orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    /// Id of the user who placed the order
    #[serde(default, alias = "user_id")]
    pub customer_id: Option<u64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A storefront user (customer or staff).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Whole-dashboard aggregate from `GET /admin/analytics/dashboard/`.
///
/// Stats, sales series and top products are opaque to the cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub stats: Vec<Value>,
    #[serde(default)]
    pub sales_data: Vec<Value>,
    #[serde(default)]
    pub top_products: Vec<Value>,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
}

/// An order list row decorated with its resolved customer.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRow {
    pub order: Order,
    pub customer: Option<Arc<User>>,
}

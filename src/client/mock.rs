//! In-memory `AdminApi` for unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{AdminApi, PageRequest};
use crate::error::{ApiError, Result};
use crate::models::{DashboardSnapshot, Order, Page, Product, User};

/// Serves pages sliced from fixed datasets and records every call.
#[derive(Default)]
pub struct MockAdminApi {
    pub orders: Mutex<Vec<Order>>,
    pub users: Mutex<Vec<User>>,
    pub products: Mutex<Vec<Product>>,
    /// Fail every call with a network error
    pub fail: AtomicBool,
    /// Include `total` in page responses
    pub send_total: AtomicBool,
    /// Artificial latency per call
    pub delay_ms: AtomicU64,
    calls: Mutex<Vec<String>>,
}

impl MockAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(count: u64) -> Self {
        let api = Self::new();
        *api.orders.lock().unwrap() = (1..=count).map(|id| order(id, status_for(id))).collect();
        api
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Number of recorded calls whose label starts with `prefix`.
    pub fn calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, label: String) -> Result<()> {
        self.calls.lock().unwrap().push(label);
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Network("backend unavailable".to_string()));
        }
        Ok(())
    }

    fn slice<T: Clone>(&self, data: &[T], request: PageRequest) -> Page<T> {
        let start = ((request.page.max(1) - 1) * request.limit) as usize;
        let items = data
            .iter()
            .skip(start)
            .take(request.limit as usize)
            .cloned()
            .collect();
        let total = self
            .send_total
            .load(Ordering::SeqCst)
            .then_some(data.len() as u64);
        Page::new(items, total)
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn dashboard(&self) -> Result<DashboardSnapshot> {
        self.enter("dashboard".to_string()).await?;
        let recent_orders = self.orders.lock().unwrap().iter().take(5).cloned().collect();
        Ok(DashboardSnapshot {
            recent_orders,
            ..DashboardSnapshot::default()
        })
    }

    async fn orders_page(&self, request: PageRequest) -> Result<Page<Order>> {
        self.enter(format!("orders:{}:summary={}", request.page, request.summary))
            .await?;
        let data = self.orders.lock().unwrap().clone();
        Ok(self.slice(&data, request))
    }

    async fn users_page(&self, request: PageRequest) -> Result<Page<User>> {
        self.enter(format!("users:{}", request.page)).await?;
        let data = self.users.lock().unwrap().clone();
        Ok(self.slice(&data, request))
    }

    async fn products_page(&self, request: PageRequest) -> Result<Page<Product>> {
        self.enter(format!("products:{}", request.page)).await?;
        let data = self.products.lock().unwrap().clone();
        Ok(self.slice(&data, request))
    }

    async fn user(&self, id: u64) -> Result<User> {
        self.enter(format!("user:{}", id)).await?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("user {}", id)))
    }

    async fn product(&self, id: u64) -> Result<Product> {
        self.enter(format!("product:{}", id)).await?;
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("product {}", id)))
    }

    async fn update_order_status(&self, id: u64, status: &str) -> Result<Order> {
        self.enter(format!("update_order:{}", id)).await?;
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("order {}", id)))?;
        order.status = status.to_string();
        Ok(order.clone())
    }
}

fn status_for(id: u64) -> &'static str {
    match id % 3 {
        0 => "shipped",
        1 => "pending",
        _ => "paid",
    }
}

pub fn order(id: u64, status: &str) -> Order {
    Order {
        id,
        customer_id: Some(100 + id % 4),
        status: status.to_string(),
        total: id as f64 * 10.0,
        created_at: None,
        extra: BTreeMap::new(),
    }
}

pub fn user(id: u64) -> User {
    User {
        id,
        name: format!("user-{}", id),
        email: format!("user{}@shop.test", id),
        role: Some(if id % 2 == 0 { "staff" } else { "customer" }.to_string()),
        extra: BTreeMap::new(),
    }
}

pub fn product(id: u64) -> Product {
    Product {
        id,
        name: format!("product-{}", id),
        price: 9.99,
        stock: Some(10),
        status: Some("active".to_string()),
        extra: BTreeMap::new(),
    }
}

//! Backend response envelopes.
//!
//! Every collection endpoint names its list differently (`orders`, `users`,
//! `products`); each envelope converts into the uniform [`Page`].

use serde::{Deserialize, Serialize};

use super::domain::{Order, Product, User};

/// One page of a collection as the cache layer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Advisory total-count hint, when the backend sends one
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: Option<u64>) -> Self {
        Self { items, total }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UsersEnvelope {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl From<OrdersEnvelope> for Page<Order> {
    fn from(env: OrdersEnvelope) -> Self {
        Page::new(env.orders, env.total)
    }
}

impl From<UsersEnvelope> for Page<User> {
    fn from(env: UsersEnvelope) -> Self {
        Page::new(env.users, env.total)
    }
}

impl From<ProductsEnvelope> for Page<Product> {
    fn from(env: ProductsEnvelope) -> Self {
        Page::new(env.products, env.total)
    }
}

/// `{ "user": ... }`; a null or missing user means not found.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct ProductEnvelope {
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Deserialize)]
pub struct OrderEnvelope {
    #[serde(default)]
    pub order: Option<Order>,
}

/// Body of `PUT /admin/orders/{id}/status/`.
#[derive(Debug, Serialize)]
pub struct StatusUpdateBody<'a> {
    pub status: &'a str,
}

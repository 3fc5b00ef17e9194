//! `reqwest` implementation of the admin backend contract.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{AdminApi, PageRequest};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::wire::{
    OrderEnvelope, OrdersEnvelope, ProductEnvelope, ProductsEnvelope, StatusUpdateBody,
    UserEnvelope, UsersEnvelope,
};
use crate::models::{DashboardSnapshot, Order, Page, Product, User};

/// HTTP client for the storefront admin API.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAdminApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone(), config.api_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and decodes the JSON body.
    ///
    /// 404 maps to `NotFound`; any other non-2xx status, transport or decode
    /// failure maps to `Network`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Network(format!(
                "{} returned {}: {}",
                what,
                status,
                body.trim()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to decode {}: {}", what, e)))
    }

    async fn get_page<E, T>(&self, path: &str, request: PageRequest, what: &str) -> Result<Page<T>>
    where
        E: DeserializeOwned + Into<Page<T>>,
    {
        let mut query = vec![
            ("page", request.page.to_string()),
            ("limit", request.limit.to_string()),
        ];
        if request.summary {
            query.push(("summary", "true".to_string()));
        }
        debug!(path, page = request.page, limit = request.limit, "fetching page");

        let envelope: E = self
            .send(self.client.get(self.url(path)).query(&query), what)
            .await?;
        Ok(envelope.into())
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn dashboard(&self) -> Result<DashboardSnapshot> {
        self.send(
            self.client.get(self.url("/admin/analytics/dashboard/")),
            "dashboard",
        )
        .await
    }

    async fn orders_page(&self, request: PageRequest) -> Result<Page<Order>> {
        self.get_page::<OrdersEnvelope, _>("/admin/get_all_orders", request, "orders")
            .await
    }

    async fn users_page(&self, request: PageRequest) -> Result<Page<User>> {
        self.get_page::<UsersEnvelope, _>("/admin/get_all_users", request, "users")
            .await
    }

    async fn products_page(&self, request: PageRequest) -> Result<Page<Product>> {
        self.get_page::<ProductsEnvelope, _>("/admin/get_all_products", request, "products")
            .await
    }

    async fn user(&self, id: u64) -> Result<User> {
        let what = format!("user {}", id);
        let envelope: UserEnvelope = self
            .send(self.client.get(self.url(&format!("/admin/users/{}/", id))), &what)
            .await?;
        envelope.user.ok_or(ApiError::NotFound(what))
    }

    async fn product(&self, id: u64) -> Result<Product> {
        let what = format!("product {}", id);
        let envelope: ProductEnvelope = self
            .send(
                self.client.get(self.url(&format!("/admin/products/{}/", id))),
                &what,
            )
            .await?;
        envelope.product.ok_or(ApiError::NotFound(what))
    }

    async fn update_order_status(&self, id: u64, status: &str) -> Result<Order> {
        let what = format!("order {}", id);
        let request = self
            .client
            .put(self.url(&format!("/admin/orders/{}/status/", id)))
            .json(&StatusUpdateBody { status });
        let envelope: OrderEnvelope = self.send(request, &what).await?;
        envelope.order.ok_or(ApiError::NotFound(what))
    }
}

//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::ResourceKey;
use crate::collection::{CollectionFetcher, CollectionState, Paginated};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    ClearResponse, DashboardSnapshot, HealthResponse, InvalidateResponse, Order, OrderRow,
    PageQuery, Product, RefreshQuery, StatsResponse, StatusUpdateRequest, User,
};
use crate::service::AdminCache;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<AdminCache>,
}

impl AppState {
    pub fn new(cache: Arc<AdminCache>) -> Self {
        Self { cache }
    }

    /// Builds the service against the backend named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(AdminCache::from_config(config)))
    }
}

/// Collections exposed under their own route prefix.
pub trait Routed: Paginated {
    fn fetcher(cache: &AdminCache) -> &CollectionFetcher<Self>;
}

impl Routed for Order {
    fn fetcher(cache: &AdminCache) -> &CollectionFetcher<Self> {
        cache.orders()
    }
}

impl Routed for User {
    fn fetcher(cache: &AdminCache) -> &CollectionFetcher<Self> {
        cache.users()
    }
}

impl Routed for Product {
    fn fetcher(cache: &AdminCache) -> &CollectionFetcher<Self> {
        cache.products()
    }
}

/// Handler for GET /dashboard
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<Arc<DashboardSnapshot>>> {
    let dashboard = state.cache.dashboard(query.refresh).await?;
    Ok(Json(dashboard))
}

/// Handler for GET /orders, /users and /products
///
/// `?page=N` fetches page N; `?refresh=true` bypasses the page-1 cache.
pub async fn collection_handler<T: Routed>(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Arc<CollectionState<T>>>> {
    let collection = T::fetcher(&state.cache)
        .fetch_page(query.page(), query.refresh)
        .await?;
    Ok(Json(collection))
}

/// Handler for POST /orders/more, /users/more and /products/more
pub async fn load_more_handler<T: Routed>(
    State(state): State<AppState>,
) -> Result<Json<Arc<CollectionState<T>>>> {
    let collection = T::fetcher(&state.cache).load_more().await?;
    Ok(Json(collection))
}

/// Handler for GET /orders/rows
pub async fn order_rows_handler(State(state): State<AppState>) -> Json<Vec<OrderRow>> {
    Json(state.cache.order_rows().await)
}

/// Handler for GET /users/:id
pub async fn user_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Arc<User>>> {
    state
        .cache
        .user(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))
}

/// Handler for GET /products/:id
pub async fn product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Arc<Product>>> {
    state
        .cache
        .product(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Product {} not found", id)))
}

/// Handler for PUT /orders/:id/status
pub async fn order_status_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<Order>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let order = state.cache.update_order_status(id, req.status.trim()).await?;
    Ok(Json(order))
}

/// Handler for DELETE /cache/:key
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let key: ResourceKey = key.parse()?;
    let removed = state.cache.invalidate(key).await;
    Ok(Json(InvalidateResponse::new(key.as_str(), removed)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse::new(state.cache.clear_all().await))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{self, MockAdminApi};

    fn state_with(api: Arc<MockAdminApi>) -> AppState {
        AppState::new(Arc::new(AdminCache::new(api, &Config::default())))
    }

    #[tokio::test]
    async fn test_collection_then_load_more() {
        let api = Arc::new(MockAdminApi::with_orders(30));
        let state = state_with(api.clone());

        let first = collection_handler::<Order>(State(state.clone()), Query(PageQuery::default()))
            .await
            .unwrap();
        assert_eq!(first.items.len(), 25);
        assert!(first.cursor.has_more);

        let more = load_more_handler::<Order>(State(state)).await.unwrap();
        assert_eq!(more.items.len(), 30);
        assert_eq!(more.cursor.page, 2);
        assert!(!more.cursor.has_more);
    }

    #[tokio::test]
    async fn test_collection_rejects_skipped_page() {
        let api = Arc::new(MockAdminApi::with_orders(30));
        let state = state_with(api);

        let query = PageQuery {
            page: Some(3),
            refresh: false,
        };
        let result = collection_handler::<Order>(State(state), Query(query)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_user_handler_not_found() {
        let api = Arc::new(MockAdminApi::new());
        *api.users.lock().unwrap() = vec![mock::user(1)];
        let state = state_with(api);

        assert!(user_handler(State(state.clone()), Path(1)).await.is_ok());
        let result = user_handler(State(state), Path(2)).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_order_status_rejects_blank() {
        let api = Arc::new(MockAdminApi::with_orders(3));
        let state = state_with(api.clone());

        let req = StatusUpdateRequest {
            status: "  ".to_string(),
        };
        let result = order_status_handler(State(state), Path(1), Json(req)).await;

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(api.calls("update_order"), 0);
    }

    #[tokio::test]
    async fn test_order_status_invalidates_orders() {
        let api = Arc::new(MockAdminApi::with_orders(3));
        let state = state_with(api.clone());
        collection_handler::<Order>(State(state.clone()), Query(PageQuery::default()))
            .await
            .unwrap();

        let req = StatusUpdateRequest {
            status: "shipped".to_string(),
        };
        let order = order_status_handler(State(state.clone()), Path(1), Json(req))
            .await
            .unwrap();
        assert_eq!(order.status, "shipped");

        collection_handler::<Order>(State(state), Query(PageQuery::default()))
            .await
            .unwrap();
        assert_eq!(api.calls("orders:"), 2);
    }

    #[tokio::test]
    async fn test_invalidate_handler() {
        let state = state_with(Arc::new(MockAdminApi::new()));

        let response = invalidate_handler(State(state.clone()), Path("orders".to_string()))
            .await
            .unwrap();
        assert_eq!(response.key, "orders");
        assert!(!response.removed);

        let result = invalidate_handler(State(state), Path("sessions".to_string())).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let api = Arc::new(MockAdminApi::with_orders(3));
        let state = state_with(api);
        state.cache.dashboard(false).await.unwrap();

        let response = clear_handler(State(state)).await;
        assert_eq!(response.removed, 1);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = state_with(Arc::new(MockAdminApi::new()));

        let response = stats_handler(State(state)).await;
        assert_eq!(response.aggregate.hits, 0);
        assert_eq!(response.users.misses, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}

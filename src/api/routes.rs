//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, collection_handler, dashboard_handler, health_handler, invalidate_handler,
    load_more_handler, order_rows_handler, order_status_handler, product_handler, stats_handler,
    user_handler, AppState,
};
use crate::models::{Order, Product, User};

/// Creates the gateway router.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/dashboard", get(dashboard_handler))
        // Collections
        .route("/orders", get(collection_handler::<Order>))
        .route("/orders/more", post(load_more_handler::<Order>))
        .route("/orders/rows", get(order_rows_handler))
        .route("/orders/:id/status", put(order_status_handler))
        .route("/users", get(collection_handler::<User>))
        .route("/users/more", post(load_more_handler::<User>))
        .route("/users/:id", get(user_handler))
        .route("/products", get(collection_handler::<Product>))
        .route("/products/more", post(load_more_handler::<Product>))
        .route("/products/:id", get(product_handler))
        // Invalidation
        .route("/cache", delete(clear_handler))
        .route("/cache/:key", delete(invalidate_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::client::mock::MockAdminApi;
    use crate::config::Config;
    use crate::service::AdminCache;

    fn create_test_app(api: MockAdminApi) -> Router {
        let cache = AdminCache::new(Arc::new(api), &Config::default());
        create_router(AppState::new(Arc::new(cache)))
    }

    async fn status_of(app: Router, method: &str, uri: &str) -> StatusCode {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(MockAdminApi::new());
        assert_eq!(status_of(app, "GET", "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_orders_endpoint() {
        let app = create_test_app(MockAdminApi::with_orders(3));
        assert_eq!(status_of(app, "GET", "/orders?page=1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_more_before_page_one_loads_page_one() {
        let app = create_test_app(MockAdminApi::with_orders(3));
        assert_eq!(status_of(app, "POST", "/users/more").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_page_zero_is_bad_request() {
        let app = create_test_app(MockAdminApi::with_orders(3));
        assert_eq!(
            status_of(app, "GET", "/orders?page=0").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_backend_failure_is_bad_gateway() {
        let api = MockAdminApi::new();
        api.set_failing(true);
        let app = create_test_app(api);
        assert_eq!(
            status_of(app, "GET", "/dashboard").await,
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_product_not_found() {
        let app = create_test_app(MockAdminApi::new());
        assert_eq!(
            status_of(app, "GET", "/products/5").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_unknown_cache_key() {
        let app = create_test_app(MockAdminApi::new());
        assert_eq!(
            status_of(app, "DELETE", "/cache/sessions").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let app = create_test_app(MockAdminApi::new());
        assert_eq!(status_of(app, "DELETE", "/cache").await, StatusCode::OK);
    }
}

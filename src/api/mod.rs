//! API Module
//!
//! HTTP gateway in front of the admin cache.
//!
//! # Endpoints
//! - `GET /dashboard` - Dashboard aggregate
//! - `GET /orders`, `/users`, `/products` - One page of a collection
//! - `POST /orders/more`, `/users/more`, `/products/more` - Next page
//! - `GET /orders/rows` - Loaded orders with their customers
//! - `GET /users/:id`, `/products/:id` - Single entity lookup
//! - `PUT /orders/:id/status` - Update an order's status
//! - `DELETE /cache/:key` - Invalidate one aggregate
//! - `DELETE /cache` - Clear every cache tier
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! Admin Cache Service
//!
//! Owns every cache tier and fetcher and is the single entry point the
//! gateway and background tasks talk to. Share it behind an `Arc`.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{AggregateCache, Clock, ResourceKey, SingleFlight, Snapshot, SystemClock};
use crate::client::{AdminApi, HttpAdminApi};
use crate::collection::CollectionFetcher;
use crate::config::Config;
use crate::error::Result;
use crate::invalidation::{InvalidationController, Mutation};
use crate::lookup::EntityResolver;
use crate::models::{DashboardSnapshot, Order, OrderRow, Product, StatsResponse, User};

type DashboardResult = Result<Arc<DashboardSnapshot>>;

pub struct AdminCache {
    api: Arc<dyn AdminApi>,
    clock: Arc<dyn Clock>,
    aggregate: Arc<RwLock<AggregateCache>>,
    dashboard_inflight: SingleFlight<u64, DashboardResult>,
    orders: CollectionFetcher<Order>,
    users: CollectionFetcher<User>,
    products: CollectionFetcher<Product>,
    user_lookup: EntityResolver<User>,
    product_lookup: EntityResolver<Product>,
    invalidation: InvalidationController,
}

impl AdminCache {
    pub fn new(api: Arc<dyn AdminApi>, config: &Config) -> Self {
        Self::with_clock(api, config, Arc::new(SystemClock))
    }

    /// Builds the service against the HTTP backend named in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HttpAdminApi::from_config(config)), config)
    }

    pub fn with_clock(api: Arc<dyn AdminApi>, config: &Config, clock: Arc<dyn Clock>) -> Self {
        let aggregate = Arc::new(RwLock::new(AggregateCache::new(config.aggregate_ttl_ms())));

        let orders = CollectionFetcher::new(
            Arc::clone(&api),
            Arc::clone(&aggregate),
            Arc::clone(&clock),
            config.page_size,
        );
        let users = CollectionFetcher::new(
            Arc::clone(&api),
            Arc::clone(&aggregate),
            Arc::clone(&clock),
            config.page_size,
        );
        let products = CollectionFetcher::new(
            Arc::clone(&api),
            Arc::clone(&aggregate),
            Arc::clone(&clock),
            config.page_size,
        );

        let user_lookup = EntityResolver::new(
            Arc::clone(&api),
            Arc::clone(&clock),
            config.lookup_capacity,
            config.lookup_ttl_ms(),
        );
        let product_lookup = EntityResolver::new(
            Arc::clone(&api),
            Arc::clone(&clock),
            config.lookup_capacity,
            config.lookup_ttl_ms(),
        );

        let invalidation = InvalidationController::new(
            Arc::clone(&aggregate),
            user_lookup.clone(),
            product_lookup.clone(),
        );

        info!(
            aggregate_ttl = config.aggregate_ttl,
            lookup_ttl = config.lookup_ttl,
            page_size = config.page_size,
            lookup_capacity = config.lookup_capacity,
            "admin cache initialized"
        );

        Self {
            api,
            clock,
            aggregate,
            dashboard_inflight: SingleFlight::new(),
            orders,
            users,
            products,
            user_lookup,
            product_lookup,
            invalidation,
        }
    }

    pub fn orders(&self) -> &CollectionFetcher<Order> {
        &self.orders
    }

    pub fn users(&self) -> &CollectionFetcher<User> {
        &self.users
    }

    pub fn products(&self) -> &CollectionFetcher<Product> {
        &self.products
    }

    pub fn user_lookup(&self) -> &EntityResolver<User> {
        &self.user_lookup
    }

    pub fn product_lookup(&self) -> &EntityResolver<Product> {
        &self.product_lookup
    }

    pub fn invalidation(&self) -> &InvalidationController {
        &self.invalidation
    }

    // == Dashboard ==
    /// Returns the dashboard aggregate, from cache while fresh.
    ///
    /// A failed fetch leaves any previous entry in place and returns the error.
    pub async fn dashboard(&self, force_refresh: bool) -> DashboardResult {
        if !force_refresh {
            let now = self.clock.now_ms();
            let cached = self
                .aggregate
                .write()
                .await
                .get_valid(ResourceKey::Dashboard, now);
            if let Some(Snapshot::Dashboard(snapshot)) = cached {
                debug!("dashboard served from cache");
                return Ok(snapshot);
            }
        }

        let generation = {
            let mut aggregate = self.aggregate.write().await;
            if force_refresh {
                aggregate.bump_generation(ResourceKey::Dashboard)
            } else {
                aggregate.generation(ResourceKey::Dashboard)
            }
        };

        let api = Arc::clone(&self.api);
        let aggregate = Arc::clone(&self.aggregate);
        let clock = Arc::clone(&self.clock);
        self.dashboard_inflight
            .run(generation, move || async move {
                info!(generation, "fetching dashboard from backend");
                match api.dashboard().await {
                    Ok(dashboard) => {
                        let dashboard = Arc::new(dashboard);
                        let stored = aggregate.write().await.put_if_current(
                            ResourceKey::Dashboard,
                            Snapshot::Dashboard(Arc::clone(&dashboard)),
                            clock.now_ms(),
                            generation,
                        );
                        if !stored {
                            debug!("outdated dashboard not cached");
                        }
                        Ok(dashboard)
                    }
                    Err(err) => {
                        warn!(error = %err, "dashboard fetch failed");
                        Err(err)
                    }
                }
            })
            .await
    }

    pub async fn user(&self, id: u64) -> Option<Arc<User>> {
        self.user_lookup.get_by_id(id).await
    }

    pub async fn product(&self, id: u64) -> Option<Arc<Product>> {
        self.product_lookup.get_by_id(id).await
    }

    // == Mutations ==
    /// Updates an order's status, then drops the aggregates that are now
    /// stale. Nothing is invalidated when the backend rejects the update.
    pub async fn update_order_status(&self, order_id: u64, status: &str) -> Result<Order> {
        let order = self.api.update_order_status(order_id, status).await?;
        info!(order_id, status, "order status updated");
        self.invalidation
            .after_mutation(Mutation::OrderStatus { order_id })
            .await;
        Ok(order)
    }

    pub async fn invalidate(&self, key: ResourceKey) -> bool {
        self.invalidation.invalidate(key).await
    }

    pub async fn clear_all(&self) -> usize {
        self.invalidation.clear_all().await
    }

    // == Order Rows ==
    /// Currently loaded orders, each paired with its customer from the users
    /// lookup cache. Customers that cannot be resolved are left as `None`.
    pub async fn order_rows(&self) -> Vec<OrderRow> {
        let orders = self.orders.state().await.items;
        let customers = self
            .user_lookup
            .get_many(orders.iter().filter_map(|order| order.customer_id))
            .await;

        orders
            .into_iter()
            .map(|order| {
                let customer = order
                    .customer_id
                    .and_then(|id| customers.get(&id).cloned());
                OrderRow { order, customer }
            })
            .collect()
    }

    /// Drops stale lookup entries. Aggregates expire lazily and are left alone.
    pub async fn sweep_lookups(&self) -> usize {
        self.user_lookup.sweep_expired().await + self.product_lookup.sweep_expired().await
    }

    pub async fn stats(&self) -> StatsResponse {
        let aggregate = self.aggregate.read().await.stats();
        StatsResponse::new(
            aggregate,
            self.user_lookup.stats().await,
            self.product_lookup.stats().await,
        )
    }
}

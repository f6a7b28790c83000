//! HTTP surface for the inventory order station.
//!
//! Exposes the catalog, stock levels and the order queue over REST, sends
//! robot pick programs as orders are processed, and reports structured
//! logs (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod station;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use robot::RobotClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;
use station::Station;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: RobotClient + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<R>))
        .route("/items", get(routes::inventory::items::<R>))
        .route("/inventory", get(routes::inventory::list::<R>))
        .route("/inventory/low-stock", get(routes::inventory::low_stock::<R>))
        .route("/orders", post(routes::orders::create::<R>))
        .route("/orders/{id}", get(routes::orders::get::<R>))
        .route("/orders/pending", get(routes::orders::pending::<R>))
        .route("/orders/processed", get(routes::orders::processed::<R>))
        .route("/orders/process-next", post(routes::orders::process_next::<R>))
        .route("/revenue", get(routes::orders::revenue::<R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps a station in the shared handler state.
pub fn create_state<R: RobotClient + 'static>(station: Station<R>) -> Arc<AppState<R>> {
    Arc::new(AppState::new(station))
}

//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::OrderId;
use robot::RobotClient;
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub pending_orders: usize,
    pub next_order: Option<OrderId>,
}

/// GET /health: returns station health and queue depth.
pub async fn check<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<HealthResponse> {
    let station = state.station.lock().await;
    Json(HealthResponse {
        status: "ok",
        pending_orders: station.order_book().pending_len(),
        next_order: station.order_book().peek_next().map(|order| order.id()),
    })
}

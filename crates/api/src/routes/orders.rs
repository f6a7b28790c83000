//! Order queue endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};
use domain::{Money, Order, OrderLine, OrderState};
use robot::RobotClient;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::station::ProcessReport;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub lines: Vec<OrderLineRequest>,
}

#[derive(Deserialize)]
pub struct OrderLineRequest {
    pub item_id: ItemId,
    pub quantity: f64,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub state: OrderState,
    pub lines_summary: String,
    pub lines: Vec<OrderLineResponse>,
    pub total: Money,
}

impl OrderResponse {
    fn new(order: &Order, state: OrderState) -> Self {
        Self {
            id: order.id(),
            placed_at: order.placed_at(),
            state,
            lines_summary: order.lines_summary(),
            lines: order.lines().iter().map(OrderLineResponse::from).collect(),
            total: order.total(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub item_id: ItemId,
    pub item: String,
    pub quantity: f64,
    pub line_total: Money,
}

impl From<&OrderLine> for OrderLineResponse {
    fn from(line: &OrderLine) -> Self {
        Self {
            item_id: line.item().id(),
            item: line.item().name().to_string(),
            quantity: line.quantity(),
            line_total: line.line_total(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: OrderId,
    pub state: OrderState,
    pub pending_orders: usize,
}

#[derive(Serialize)]
pub struct ProcessReportResponse {
    pub order: OrderResponse,
    pub programs_sent: usize,
    pub programs_failed: usize,
    pub manual_lines: usize,
    pub total_revenue: Money,
}

#[derive(Serialize)]
pub struct RevenueResponse {
    pub total_revenue: Money,
    pub processed_orders: usize,
}

// -- Handlers --

/// GET /orders/pending: waiting orders, oldest first.
#[tracing::instrument(skip(state))]
pub async fn pending<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<Vec<OrderResponse>> {
    let station = state.station.lock().await;
    let orders = station
        .order_book()
        .pending()
        .map(|order| OrderResponse::new(order, OrderState::Pending))
        .collect();
    Json(orders)
}

/// GET /orders/processed: completed orders in processing order.
#[tracing::instrument(skip(state))]
pub async fn processed<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<Vec<OrderResponse>> {
    let station = state.station.lock().await;
    let orders = station
        .order_book()
        .processed()
        .iter()
        .map(|order| OrderResponse::new(order, OrderState::Processed))
        .collect();
    Json(orders)
}

/// GET /orders/{id}: one order, pending or processed.
#[tracing::instrument(skip(state))]
pub async fn get<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id: {e}")))?;

    let station = state.station.lock().await;
    let book = station.order_book();
    match (book.find(order_id), book.state_of(order_id)) {
        (Some(order), Some(order_state)) => Ok(Json(OrderResponse::new(order, order_state))),
        _ => Err(ApiError::NotFound(format!("Order {order_id} not found"))),
    }
}

/// POST /orders: queue a new order at the tail of the pending queue.
#[tracing::instrument(skip(state, req), fields(lines = req.lines.len()))]
pub async fn create<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    if req.lines.is_empty() {
        return Err(ApiError::BadRequest("order needs at least one line".into()));
    }
    if let Some(line) = req
        .lines
        .iter()
        .find(|line| !(line.quantity > 0.0 && Money::can_price(line.quantity)))
    {
        return Err(ApiError::BadRequest(format!(
            "invalid quantity {} for item {}",
            line.quantity, line.item_id
        )));
    }

    let lines: Vec<(ItemId, f64)> = req
        .lines
        .iter()
        .map(|line| (line.item_id, line.quantity))
        .collect();

    let mut station = state.station.lock().await;
    let order_id = station.queue_order(&lines)?;

    let response = OrderCreatedResponse {
        order_id,
        state: OrderState::Pending,
        pending_orders: station.order_book().pending_len(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /orders/process-next: process the oldest pending order.
///
/// Responds 204 when nothing is pending.
#[tracing::instrument(skip(state))]
pub async fn process_next<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Response {
    let mut station = state.station.lock().await;
    match station.process_next().await {
        Some(report) => {
            let response = report_response(report, station.total_revenue());
            (StatusCode::OK, Json(response)).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn report_response(report: ProcessReport, total_revenue: Money) -> ProcessReportResponse {
    ProcessReportResponse {
        order: OrderResponse::new(&report.order, OrderState::Processed),
        programs_sent: report.programs_sent,
        programs_failed: report.programs_failed,
        manual_lines: report.manual_lines,
        total_revenue,
    }
}

/// GET /revenue: sum of every processed order's total.
#[tracing::instrument(skip(state))]
pub async fn revenue<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<RevenueResponse> {
    let station = state.station.lock().await;
    Json(RevenueResponse {
        total_revenue: station.total_revenue(),
        processed_orders: station.order_book().processed_len(),
    })
}

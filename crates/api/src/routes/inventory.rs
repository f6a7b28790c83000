//! Catalog and stock views.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::ItemId;
use domain::{Item, ItemKind, Money, StockEntry};
use robot::{Bin, RobotClient};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub price_per_unit: Money,
    pub pricing_unit: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    pub bin: Option<Bin>,
    pub summary: String,
}

impl ItemResponse {
    fn new(item: &Item, bin: Option<Bin>) -> Self {
        Self {
            id: item.id(),
            name: item.name().to_string(),
            price_per_unit: item.price_per_unit(),
            pricing_unit: item.pricing_unit().to_string(),
            kind: item.kind().clone(),
            bin,
            summary: item.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct StockResponse {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub low: bool,
}

impl From<&StockEntry> for StockResponse {
    fn from(entry: &StockEntry) -> Self {
        let item = entry.item();
        Self {
            item_id: item.id(),
            name: item.name().to_string(),
            quantity: entry.quantity(),
            unit: item.pricing_unit().to_string(),
            low: entry.is_low(),
        }
    }
}

/// GET /items: every catalog item in ID order.
#[tracing::instrument(skip(state))]
pub async fn items<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<Vec<ItemResponse>> {
    let station = state.station.lock().await;
    let items = station
        .catalog()
        .items()
        .iter()
        .map(|item| ItemResponse::new(item, station.bin_of(item.id())))
        .collect();
    Json(items)
}

/// GET /inventory: on-hand quantity of every tracked item.
#[tracing::instrument(skip(state))]
pub async fn list<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<Vec<StockResponse>> {
    let station = state.station.lock().await;
    Json(station.inventory().entries().map(StockResponse::from).collect())
}

/// GET /inventory/low-stock: tracked items below the reorder threshold.
#[tracing::instrument(skip(state))]
pub async fn low_stock<R: RobotClient + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Json<Vec<StockResponse>> {
    let station = state.station.lock().await;
    let inventory = station.inventory();
    let low = inventory
        .low_stock_items()
        .iter()
        .filter_map(|item| inventory.get(item.id()))
        .map(StockResponse::from)
        .collect();
    Json(low)
}

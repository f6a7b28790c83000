//! Startup data: the catalog, opening stock and orders already waiting.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use common::ItemId;
use domain::{Catalog, DomainError, Inventory, ItemKind, Money, Order, OrderBook};
use robot::Bin;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or applying seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid item {name:?}: {source}")]
    InvalidItem {
        name: String,
        #[source]
        source: DomainError,
    },

    #[error("order references unknown item {0:?}")]
    UnknownItem(String),

    #[error("item {0:?} is defined more than once")]
    DuplicateItem(String),

    #[error("item {0:?} cannot be stored in the shipping bin")]
    ShippingBin(String),
}

/// An item definition together with its opening stock.
///
/// Items without `stock` are sold but never tracked by the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedItem {
    pub name: String,
    pub price: Money,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default)]
    pub stock: Option<f64>,
    #[serde(default)]
    pub bin: Option<Bin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedLine {
    pub item: String,
    pub quantity: f64,
}

/// An order placed `minutes_ago` minutes before startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOrder {
    pub minutes_ago: i64,
    pub lines: Vec<SeedLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    pub items: Vec<SeedItem>,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

/// Domain state produced by [`SeedData::build`].
#[derive(Debug)]
pub struct Seeded {
    pub catalog: Catalog,
    pub inventory: Inventory,
    pub order_book: OrderBook,
    pub bins: HashMap<ItemId, Bin>,
}

impl SeedData {
    /// The demo warehouse: four items and three waiting orders.
    pub fn demo() -> Self {
        let bulk = |unit: &str| ItemKind::Bulk {
            measurement_unit: unit.to_string(),
        };
        let item = |name: &str, cents, kind, stock, bin| SeedItem {
            name: name.to_string(),
            price: Money::from_cents(cents),
            kind,
            stock: Some(stock),
            bin,
        };
        let order = |minutes_ago, lines: &[(&str, f64)]| SeedOrder {
            minutes_ago,
            lines: lines
                .iter()
                .map(|(item, quantity)| SeedLine {
                    item: item.to_string(),
                    quantity: *quantity,
                })
                .collect(),
        };

        Self {
            items: vec![
                item("Rice", 120, bulk("kg"), 12.0, Some(Bin::A)),
                item("Cable", 400, bulk("m"), 40.0, Some(Bin::B)),
                item("Screw", 50, ItemKind::Unit { weight: 0.02 }, 50.0, Some(Bin::C)),
                item("Pen", 200, ItemKind::Unit { weight: 0.01 }, 3.0, None),
            ],
            orders: vec![
                order(10, &[("Rice", 2.5), ("Pen", 2.0)]),
                order(7, &[("Screw", 10.0), ("Cable", 3.0)]),
                order(2, &[("Pen", 1.0), ("Rice", 1.0)]),
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Creates the catalog, stock and queue, with order times relative to `now`.
    ///
    /// Orders are queued oldest first regardless of their order in the data.
    pub fn build(self, now: DateTime<Utc>) -> Result<Seeded, SeedError> {
        let mut catalog = Catalog::new();
        let mut inventory = Inventory::new();
        let mut bins = HashMap::new();

        for seed in self.items {
            if catalog.find_by_name(&seed.name).is_some() {
                return Err(SeedError::DuplicateItem(seed.name));
            }
            if seed.bin == Some(Bin::Shipping) {
                return Err(SeedError::ShippingBin(seed.name));
            }

            let invalid = |source| SeedError::InvalidItem {
                name: seed.name.clone(),
                source,
            };
            let item = catalog
                .add(seed.name.clone(), seed.price, seed.kind)
                .map_err(invalid)?;
            item.validate().map_err(invalid)?;

            if let Some(bin) = seed.bin {
                bins.insert(item.id(), bin);
            }
            if let Some(stock) = seed.stock {
                inventory.track(item, stock);
            }
        }

        let mut orders = self.orders;
        orders.sort_by(|a, b| b.minutes_ago.cmp(&a.minutes_ago));

        let mut order_book = OrderBook::new();
        for seed in orders {
            let mut builder = Order::builder(now - Duration::minutes(seed.minutes_ago));
            for line in seed.lines {
                let item = catalog
                    .find_by_name(&line.item)
                    .ok_or_else(|| SeedError::UnknownItem(line.item.clone()))?;
                builder = builder.line(item, line.quantity);
            }
            order_book.queue_order(builder.build());
        }

        tracing::info!(
            items = catalog.len(),
            tracked = inventory.len(),
            pending = order_book.pending_len(),
            "seed data loaded"
        );

        Ok(Seeded {
            catalog,
            inventory,
            order_book,
            bins,
        })
    }
}

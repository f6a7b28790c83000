//! Orders, order lines and the order book.

mod book;
mod line;
mod state;

pub use book::OrderBook;
pub use line::OrderLine;
pub use state::OrderState;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};

use crate::item::Item;
use crate::money::Money;

/// A timestamped, ordered collection of order lines.
///
/// Orders are built fully formed and never change afterwards. Totals are
/// derived on every call.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    placed_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
}

impl Order {
    /// Creates an order with a fresh ID. An empty line list is allowed.
    pub fn new(placed_at: DateTime<Utc>, lines: Vec<OrderLine>) -> Self {
        Self::with_id(OrderId::new(), placed_at, lines)
    }

    /// Creates an order with a known ID.
    pub fn with_id(id: OrderId, placed_at: DateTime<Utc>, lines: Vec<OrderLine>) -> Self {
        Self {
            id,
            placed_at,
            lines,
        }
    }

    /// Starts building an order placed at `placed_at`.
    pub fn builder(placed_at: DateTime<Utc>) -> OrderBuilder {
        OrderBuilder {
            placed_at,
            lines: Vec::new(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the sum of all line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Returns the requested quantity of one item summed over all lines.
    pub fn quantity_of(&self, item: ItemId) -> f64 {
        self.lines
            .iter()
            .filter(|line| line.item().id() == item)
            .map(OrderLine::quantity)
            .sum()
    }

    /// Short "name x quantity" listing, in line order.
    pub fn lines_summary(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{} x {}", line.item().name(), line.quantity()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} lines, total {}",
            self.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.lines.len(),
            self.total()
        )
    }
}

/// Collects lines for an [`Order`].
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    placed_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
}

impl OrderBuilder {
    /// Appends a line.
    pub fn line(mut self, item: &Arc<Item>, quantity: f64) -> Self {
        self.lines.push(OrderLine::new(Arc::clone(item), quantity));
        self
    }

    pub fn build(self) -> Order {
        Order::new(self.placed_at, self.lines)
    }
}

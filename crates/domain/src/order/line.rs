//! A request for a quantity of one item.

use std::sync::Arc;

use crate::item::Item;
use crate::money::Money;

/// One line of an order: an item and the requested quantity.
#[derive(Debug, Clone)]
pub struct OrderLine {
    item: Arc<Item>,
    quantity: f64,
}

impl OrderLine {
    pub fn new(item: Arc<Item>, quantity: f64) -> Self {
        Self { item, quantity }
    }

    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Returns `quantity × price_per_unit`, computed in fixed point.
    pub fn line_total(&self) -> Money {
        self.item.price_per_unit().times_quantity(self.quantity)
    }
}

impl std::fmt::Display for OrderLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x {} = {}",
            self.item.name(),
            self.quantity,
            self.line_total()
        )
    }
}

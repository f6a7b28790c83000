//! On-hand stock keyed by item ID.

use std::collections::BTreeMap;
use std::sync::Arc;

use common::ItemId;

use crate::error::{DomainError, DomainResult};
use crate::item::Item;

/// Items with strictly less than this quantity on hand are low on stock.
pub const LOW_STOCK_THRESHOLD: f64 = 5.0;

/// One tracked item and its on-hand quantity.
#[derive(Debug, Clone)]
pub struct StockEntry {
    item: Arc<Item>,
    quantity: f64,
}

impl StockEntry {
    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn is_low(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}

/// Current on-hand quantity per item.
///
/// Entries iterate in ascending [`ItemId`] order, which is catalog creation
/// order. Quantities are not validated and may go negative.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    stock: BTreeMap<ItemId, StockEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inventory from `(item, quantity)` pairs.
    pub fn with_stock(stock: impl IntoIterator<Item = (Arc<Item>, f64)>) -> Self {
        let mut inventory = Self::new();
        for (item, quantity) in stock {
            inventory.track(item, quantity);
        }
        inventory
    }

    /// Starts tracking an item, overwriting any previous quantity.
    pub fn track(&mut self, item: Arc<Item>, quantity: f64) {
        self.stock.insert(item.id(), StockEntry { item, quantity });
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.stock.contains_key(&id)
    }

    pub fn quantity(&self, id: ItemId) -> Option<f64> {
        self.stock.get(&id).map(|entry| entry.quantity)
    }

    pub fn get(&self, id: ItemId) -> Option<&StockEntry> {
        self.stock.get(&id)
    }

    /// Adds `delta` to a tracked item's quantity and returns the new quantity.
    pub fn adjust(&mut self, id: ItemId, delta: f64) -> DomainResult<f64> {
        let entry = self
            .stock
            .get_mut(&id)
            .ok_or(DomainError::UnknownItem(id))?;
        entry.quantity += delta;
        Ok(entry.quantity)
    }

    /// Subtracts `quantity` if the item is tracked.
    ///
    /// Returns false, without creating an entry, when the item is untracked.
    pub fn deduct_if_tracked(&mut self, id: ItemId, quantity: f64) -> bool {
        match self.stock.get_mut(&id) {
            Some(entry) => {
                entry.quantity -= quantity;
                true
            }
            None => false,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &StockEntry> {
        self.stock.values()
    }

    /// Returns every item whose quantity is below [`LOW_STOCK_THRESHOLD`].
    pub fn low_stock_items(&self) -> Vec<Arc<Item>> {
        self.stock
            .values()
            .filter(|entry| entry.is_low())
            .map(|entry| Arc::clone(&entry.item))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Catalog;
    use crate::money::Money;

    fn demo() -> (Catalog, Inventory) {
        let mut catalog = Catalog::new();
        let rice = catalog.add_bulk("Rice", Money::from_cents(120), "kg").unwrap();
        let cable = catalog.add_bulk("Cable", Money::from_cents(400), "m").unwrap();
        let screw = catalog.add_unit("Screw", Money::from_cents(50), 0.02).unwrap();
        let pen = catalog.add_unit("Pen", Money::from_cents(200), 0.01).unwrap();
        let inventory =
            Inventory::with_stock([(rice, 12.0), (cable, 40.0), (screw, 50.0), (pen, 3.0)]);
        (catalog, inventory)
    }

    #[test]
    fn test_low_stock_returns_only_items_below_threshold() {
        let (_, inventory) = demo();
        let low = inventory.low_stock_items();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name(), "Pen");
    }

    #[test]
    fn test_low_stock_threshold_is_strict() {
        let mut catalog = Catalog::new();
        let at = catalog.add_plain("At", Money::zero()).unwrap();
        let below = catalog.add_plain("Below", Money::zero()).unwrap();
        let negative = catalog.add_plain("Negative", Money::zero()).unwrap();
        let inventory = Inventory::with_stock([(at, 5.0), (below, 4.99), (negative, -1.0)]);

        let names: Vec<_> = inventory
            .low_stock_items()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names, vec!["Below", "Negative"]);
    }

    #[test]
    fn test_low_stock_empty_when_all_stocked() {
        let mut catalog = Catalog::new();
        let bolt = catalog.add_plain("Bolt", Money::zero()).unwrap();
        let inventory = Inventory::with_stock([(bolt, 100.0)]);
        assert!(inventory.low_stock_items().is_empty());
        assert!(Inventory::new().low_stock_items().is_empty());
    }

    #[test]
    fn test_entries_follow_item_id_order() {
        let mut catalog = Catalog::new();
        let first = catalog.add_plain("First", Money::zero()).unwrap();
        let second = catalog.add_plain("Second", Money::zero()).unwrap();
        let inventory = Inventory::with_stock([(second, 1.0), (first, 2.0)]);

        let ids: Vec<_> = inventory.entries().map(|e| e.item().id()).collect();
        assert_eq!(ids, vec![ItemId::new(1), ItemId::new(2)]);
    }

    #[test]
    fn test_adjust_tracked_item() {
        let (catalog, mut inventory) = demo();
        let rice = catalog.find_by_name("Rice").unwrap().id();

        assert_eq!(inventory.adjust(rice, -2.5), Ok(9.5));
        assert_eq!(inventory.adjust(rice, 0.5), Ok(10.0));
        assert_eq!(inventory.quantity(rice), Some(10.0));
    }

    #[test]
    fn test_adjust_unknown_item_fails() {
        let (_, mut inventory) = demo();
        let missing = ItemId::new(99);
        assert_eq!(
            inventory.adjust(missing, 1.0),
            Err(DomainError::UnknownItem(missing))
        );
        assert!(!inventory.contains(missing));
    }

    #[test]
    fn test_deduct_may_go_negative() {
        let (catalog, mut inventory) = demo();
        let pen = catalog.find_by_name("Pen").unwrap().id();

        assert!(inventory.deduct_if_tracked(pen, 4.0));
        assert_eq!(inventory.quantity(pen), Some(-1.0));
    }

    #[test]
    fn test_deduct_untracked_creates_no_entry() {
        let (_, mut inventory) = demo();
        let before = inventory.len();
        assert!(!inventory.deduct_if_tracked(ItemId::new(42), 1.0));
        assert_eq!(inventory.len(), before);
    }

    #[test]
    fn test_track_overwrites_quantity() {
        let (catalog, mut inventory) = demo();
        let pen = Arc::clone(catalog.find_by_name("Pen").unwrap());
        inventory.track(Arc::clone(&pen), 20.0);
        assert_eq!(inventory.quantity(pen.id()), Some(20.0));
        assert!(inventory.low_stock_items().is_empty());
    }
}

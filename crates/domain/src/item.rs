//! Sellable items and the catalog that assigns their IDs.

use std::sync::Arc;

use common::ItemId;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::money::Money;

/// Variant-specific payload of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Priced per unit, nothing else to describe.
    Plain,

    /// Priced per measurement unit, e.g. "kg", "L" or "m".
    Bulk { measurement_unit: String },

    /// Priced per discrete unit; each unit weighs `weight` kilograms.
    Unit { weight: f64 },
}

/// A sellable good and its price.
///
/// Identity is the [`ItemId`]: two items with the same name and price are
/// still different items. Items are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    price_per_unit: Money,
    #[serde(flatten)]
    kind: ItemKind,
}

impl Item {
    /// Creates an item. No validation is performed; see [`Item::validate`].
    pub fn new(id: ItemId, name: impl Into<String>, price_per_unit: Money, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            price_per_unit,
            kind,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price_per_unit(&self) -> Money {
        self.price_per_unit
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Returns the unit the price is quoted in.
    pub fn pricing_unit(&self) -> &str {
        match &self.kind {
            ItemKind::Plain | ItemKind::Unit { .. } => "unit",
            ItemKind::Bulk { measurement_unit } => measurement_unit,
        }
    }

    /// Returns the per-unit weight for discrete items.
    pub fn weight(&self) -> Option<f64> {
        match self.kind {
            ItemKind::Unit { weight } => Some(weight),
            _ => None,
        }
    }

    /// Checks that the item has a name and a non-negative price.
    ///
    /// Construction never enforces this; callers opt in.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.price_per_unit.is_negative() {
            return Err(DomainError::NegativePrice {
                name: self.name.clone(),
                price: self.price_per_unit,
            });
        }
        Ok(())
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} per {}",
            self.name,
            self.price_per_unit,
            self.pricing_unit()
        )?;
        if let ItemKind::Unit { weight } = self.kind {
            write!(f, " ({weight} kg each)")?;
        }
        Ok(())
    }
}

/// Owns the items created during setup and hands out their IDs.
///
/// IDs start at 1 and follow creation order. Items are never mutated or
/// removed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Arc<Item>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an item with the next free ID.
    ///
    /// Fails with [`DomainError::CatalogFull`] once every `u32` ID is taken.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        price: Money,
        kind: ItemKind,
    ) -> DomainResult<Arc<Item>> {
        let id = next_id(self.items.len()).ok_or(DomainError::CatalogFull)?;
        let item = Arc::new(Item::new(id, name, price, kind));
        self.items.push(Arc::clone(&item));
        Ok(item)
    }

    pub fn add_plain(&mut self, name: impl Into<String>, price: Money) -> DomainResult<Arc<Item>> {
        self.add(name, price, ItemKind::Plain)
    }

    pub fn add_bulk(
        &mut self,
        name: impl Into<String>,
        price: Money,
        measurement_unit: impl Into<String>,
    ) -> DomainResult<Arc<Item>> {
        self.add(
            name,
            price,
            ItemKind::Bulk {
                measurement_unit: measurement_unit.into(),
            },
        )
    }

    pub fn add_unit(
        &mut self,
        name: impl Into<String>,
        price: Money,
        weight: f64,
    ) -> DomainResult<Arc<Item>> {
        self.add(name, price, ItemKind::Unit { weight })
    }

    pub fn get(&self, id: ItemId) -> Option<&Arc<Item>> {
        let index = id.get().checked_sub(1)? as usize;
        self.items.get(index)
    }

    /// Returns the first item with this exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<Item>> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// ID for the item created after `len` others, if one is left.
fn next_id(len: usize) -> Option<ItemId> {
    let len = u32::try_from(len).ok()?;
    len.checked_add(1).map(ItemId::new)
}

//! Domain error types.

use common::ItemId;
use thiserror::Error;

use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors that can occur during domain operations.
///
/// Normal business conditions never produce these: an empty pending queue
/// and items missing from inventory during processing are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Item name is empty or whitespace.
    #[error("Item name is required")]
    EmptyName,

    /// Item price is below zero.
    #[error("Invalid price for {name}: {price} (must not be negative)")]
    NegativePrice { name: String, price: Money },

    /// Every item ID has been handed out.
    #[error("Catalog is full")]
    CatalogFull,

    /// No item with this ID is known.
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
}

//! Shared identifier types for the inventory order station.

mod types;

pub use types::{CustomerId, ItemId, OrderId};

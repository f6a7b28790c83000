//! Domain layer for the inventory order station.
//!
//! This crate provides the core bookkeeping types:
//! - Money, a fixed-point currency amount
//! - Item variants and the Catalog that hands out item IDs
//! - Inventory of on-hand quantities keyed by item ID
//! - Order and OrderLine with derived totals
//! - OrderBook, the pending/processed queue pair that consumes inventory
//!
//! Everything here is synchronous and free of IO. Callers that share these
//! types across tasks must serialize access themselves.

pub mod customer;
pub mod error;
pub mod inventory;
pub mod item;
pub mod money;
pub mod order;

pub use common::{CustomerId, ItemId, OrderId};
pub use customer::Customer;
pub use error::{DomainError, DomainResult};
pub use inventory::{Inventory, LOW_STOCK_THRESHOLD, StockEntry};
pub use item::{Catalog, Item, ItemKind};
pub use money::Money;
pub use order::{Order, OrderBook, OrderBuilder, OrderLine, OrderState};

//! The pending/processed order pipeline.

use std::collections::VecDeque;

use common::OrderId;

use crate::inventory::Inventory;
use crate::money::Money;

use super::{Order, OrderState};

/// Two-queue pipeline moving orders from pending to processed.
///
/// Pending orders are processed strictly first-in first-out. Processing
/// deducts each line from the inventory and counts the order towards
/// revenue. There is no internal locking.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    pending: VecDeque<Order>,
    processed: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an order to the tail of the pending queue.
    ///
    /// No duplicate detection and no capacity limit. Returns the number of
    /// pending orders after queueing.
    pub fn queue_order(&mut self, order: Order) -> usize {
        tracing::debug!(order_id = %order.id(), lines = order.line_count(), "order queued");
        metrics::counter!("orders_queued_total").increment(1);
        self.pending.push_back(order);
        self.pending.len()
    }

    /// Processes the oldest pending order against `inventory`.
    ///
    /// Every line whose item is tracked has its quantity deducted; lines for
    /// untracked items are skipped without creating an entry. Quantities may
    /// go negative. Returns `None`, touching nothing, when nothing is pending.
    pub fn process_next(&mut self, inventory: &mut Inventory) -> Option<&Order> {
        let order = self.pending.pop_front()?;

        for line in order.lines() {
            let item = line.item();
            if !inventory.deduct_if_tracked(item.id(), line.quantity()) {
                tracing::debug!(
                    order_id = %order.id(),
                    item_id = %item.id(),
                    item = item.name(),
                    "item not tracked by inventory, deduction skipped"
                );
                metrics::counter!("order_lines_skipped_total").increment(1);
            }
        }

        self.processed.push(order);
        metrics::counter!("orders_processed_total").increment(1);

        let processed = self.processed.last()?;
        tracing::info!(
            order_id = %processed.id(),
            total = %processed.total(),
            remaining = self.pending.len(),
            "order processed"
        );
        Some(processed)
    }

    /// Sum of the totals of all processed orders, recomputed on every call.
    pub fn total_revenue(&self) -> Money {
        self.processed.iter().map(Order::total).sum()
    }

    /// Pending orders, oldest first.
    pub fn pending(&self) -> impl ExactSizeIterator<Item = &Order> {
        self.pending.iter()
    }

    /// Processed orders in processing order.
    pub fn processed(&self) -> &[Order] {
        &self.processed
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn processed_len(&self) -> usize {
        self.processed.len()
    }

    /// The order the next `process_next` call would take.
    pub fn peek_next(&self) -> Option<&Order> {
        self.pending.front()
    }

    /// Finds an order in either queue, pending first.
    pub fn find(&self, id: OrderId) -> Option<&Order> {
        self.pending
            .iter()
            .chain(self.processed.iter())
            .find(|order| order.id() == id)
    }

    /// Returns which queue holds the order, or `None` if it was never queued.
    pub fn state_of(&self, id: OrderId) -> Option<OrderState> {
        if self.pending.iter().any(|order| order.id() == id) {
            Some(OrderState::Pending)
        } else if self.processed.iter().any(|order| order.id() == id) {
            Some(OrderState::Processed)
        } else {
            None
        }
    }
}

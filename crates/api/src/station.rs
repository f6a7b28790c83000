//! The station: order book, inventory and robot wired together.

use std::collections::HashMap;

use chrono::Utc;
use common::{ItemId, OrderId};
use domain::{Catalog, DomainError, DomainResult, Inventory, Money, Order, OrderBook};
use robot::{Bin, RobotClient, generate_move};

use crate::seed::Seeded;

/// Outcome of processing one order.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub order: Order,
    /// Pick programs the robot accepted.
    pub programs_sent: usize,
    /// Pick programs that could not be delivered.
    pub programs_failed: usize,
    /// Lines whose item has no storage bin, picked by hand.
    pub manual_lines: usize,
}

pub struct Station<R> {
    catalog: Catalog,
    inventory: Inventory,
    order_book: OrderBook,
    bins: HashMap<ItemId, Bin>,
    robot: R,
}

impl<R: RobotClient> Station<R> {
    pub fn new(seeded: Seeded, robot: R) -> Self {
        Self {
            catalog: seeded.catalog,
            inventory: seeded.inventory,
            order_book: seeded.order_book,
            bins: seeded.bins,
            robot,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.order_book
    }

    pub fn bin_of(&self, item: ItemId) -> Option<Bin> {
        self.bins.get(&item).copied()
    }

    pub fn total_revenue(&self) -> Money {
        self.order_book.total_revenue()
    }

    /// Queues a new order placed now.
    ///
    /// Fails with [`DomainError::UnknownItem`] if any line names an item
    /// outside the catalog; nothing is queued in that case.
    #[tracing::instrument(skip(self, lines), fields(lines = lines.len()))]
    pub fn queue_order(&mut self, lines: &[(ItemId, f64)]) -> DomainResult<OrderId> {
        let mut builder = Order::builder(Utc::now());
        for &(id, quantity) in lines {
            let item = self.catalog.get(id).ok_or(DomainError::UnknownItem(id))?;
            builder = builder.line(item, quantity);
        }

        let order = builder.build();
        let id = order.id();
        self.order_book.queue_order(order);
        Ok(id)
    }

    /// Processes the oldest pending order and sends its pick programs.
    ///
    /// The order is processed before any program is sent. A robot
    /// failure is logged and counted; it never returns the order to the
    /// queue or restores stock. Sends run one after another while the
    /// caller holds the station, so an unreachable robot delays every other
    /// caller by up to the client's connect timeout per binned line.
    #[tracing::instrument(skip(self))]
    pub async fn process_next(&mut self) -> Option<ProcessReport> {
        let order = self.order_book.process_next(&mut self.inventory)?.clone();

        let mut programs_sent = 0;
        let mut programs_failed = 0;
        let mut manual_lines = 0;
        for line in order.lines() {
            let item = line.item().id();
            let Some(bin) = self.bin_of(item) else {
                manual_lines += 1;
                continue;
            };

            let body = generate_move(bin.position(), Bin::Shipping.position());
            match self.robot.send_program(&body, item).await {
                Ok(()) => programs_sent += 1,
                Err(error) => {
                    tracing::warn!(
                        order_id = %order.id(),
                        item_id = %item,
                        %bin,
                        %error,
                        "robot program not delivered"
                    );
                    metrics::counter!("robot_programs_failed_total").increment(1);
                    programs_failed += 1;
                }
            }
        }

        Some(ProcessReport {
            order,
            programs_sent,
            programs_failed,
            manual_lines,
        })
    }
}

//! Customers and the orders they own.

use common::CustomerId;

use crate::money::Money;
use crate::order::Order;

/// A customer and the orders they have placed.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: String,
    orders: Vec<Order>,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            orders: Vec::new(),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records an order for this customer.
    pub fn create_order(&mut self, order: Order) -> &Order {
        self.orders.push(order);
        &self.orders[self.orders.len() - 1]
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Sum of the totals of every order this customer placed.
    pub fn lifetime_total(&self) -> Money {
        self.orders.iter().map(Order::total).sum()
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} orders)", self.name, self.orders.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::item::Catalog;

    #[test]
    fn test_create_order_appends() {
        let mut catalog = Catalog::new();
        let pen = catalog.add_unit("Pen", Money::from_cents(200), 0.01).unwrap();
        let mut alice = Customer::new("Alice");

        let first = alice
            .create_order(Order::builder(Utc::now()).line(&pen, 1.0).build())
            .id();
        alice.create_order(Order::builder(Utc::now()).line(&pen, 2.0).build());

        assert_eq!(alice.order_count(), 2);
        assert_eq!(alice.orders()[0].id(), first);
        assert_eq!(alice.lifetime_total(), Money::from_cents(600));
        assert_eq!(alice.to_string(), "Alice (2 orders)");
    }

    #[test]
    fn test_new_customer_has_no_orders() {
        let bob = Customer::new("Bob");
        assert_eq!(bob.order_count(), 0);
        assert!(bob.lifetime_total().is_zero());
        assert_eq!(bob.to_string(), "Bob (0 orders)");
    }
}

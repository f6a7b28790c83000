//! Fixed-point currency amounts.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Money amount backed by a decimal, never by a float.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Wraps a decimal amount.
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Returns zero money.
    pub const fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
        }
    }

    /// Creates a money amount from cents (e.g., 120 = $1.20).
    pub fn from_cents(cents: i64) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
        }
    }

    /// Returns the exact decimal amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiplies by a measured quantity.
    ///
    /// The quantity is converted to a decimal before multiplying, using the
    /// shortest decimal that round-trips the float, so `2.5` is exactly `2.5`.
    /// Non-finite quantities price at zero. A finite product too large for a
    /// decimal saturates at [`Decimal::MAX`] or [`Decimal::MIN`].
    pub fn times_quantity(&self, quantity: f64) -> Money {
        if !quantity.is_finite() || self.amount.is_zero() {
            return Money::zero();
        }
        let negative = self.amount.is_sign_negative() != (quantity < 0.0);
        let amount = match Decimal::from_f64(quantity) {
            Some(quantity) => self
                .amount
                .checked_mul(quantity)
                .unwrap_or_else(|| saturated(negative)),
            None if quantity.abs() < 1.0 => Decimal::ZERO,
            None => saturated(negative),
        };
        Money { amount }
    }

    /// Returns true if `quantity` converts to a decimal without saturating.
    pub fn can_price(quantity: f64) -> bool {
        Decimal::from_f64(quantity).is_some()
    }
}

fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rounded = self
            .amount
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        if self.is_negative() && !rounded.is_zero() {
            write!(f, "-${rounded}")
        } else {
            write!(f, "${rounded}")
        }
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money::new)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self { amount }
    }
}

/// Addition and subtraction saturate instead of overflowing.
impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        let amount = self
            .amount
            .checked_add(rhs.amount)
            .unwrap_or_else(|| saturated(rhs.amount.is_sign_negative()));
        Money { amount }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        let amount = self
            .amount
            .checked_sub(rhs.amount)
            .unwrap_or_else(|| saturated(!rhs.amount.is_sign_negative()));
        Money { amount }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

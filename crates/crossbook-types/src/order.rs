//! Order types for the Crossbook matching core.
//!
//! An order's identity, side and price never change after submission.
//! Only the matcher mutates `remaining_amount`, and only the book moves
//! `status` out of [`OrderStatus::Pending`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MarketPair, OrderId};

/// Which side of the book this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// The side this order trades against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle status of an order.
///
/// A partially filled order is still `Pending`; see
/// [`Order::is_partially_filled`]. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A limit order resting in (or having passed through) the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub market: MarketPair,
    pub side: OrderSide,
    pub price: Decimal,
    /// Amount originally requested.
    pub amount: Decimal,
    pub remaining_amount: Decimal,
    pub status: OrderStatus,
    /// Per-book submission counter. Breaks price ties (lower = earlier).
    pub sequence: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a fresh pending order. Validation happens in the book.
    #[must_use]
    pub fn new(
        market: MarketPair,
        side: OrderSide,
        price: Decimal,
        amount: Decimal,
        sequence: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            market,
            side,
            price,
            amount,
            remaining_amount: amount,
            status: OrderStatus::Pending,
            sequence,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.remaining_amount.is_zero()
    }

    #[must_use]
    pub fn filled_amount(&self) -> Decimal {
        self.amount - self.remaining_amount
    }

    #[must_use]
    pub fn is_partially_filled(&self) -> bool {
        self.is_active() && !self.filled_amount().is_zero()
    }

    /// Total value of the original order (price x amount).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy_limit(side: OrderSide, price: Decimal, amount: Decimal) -> Self {
        Self::new(MarketPair::default(), side, price, amount, 0)
    }

    pub fn dummy_with_sequence(
        side: OrderSide,
        price: Decimal,
        amount: Decimal,
        sequence: u64,
    ) -> Self {
        Self::new(MarketPair::default(), side, price, amount, sequence)
    }
}

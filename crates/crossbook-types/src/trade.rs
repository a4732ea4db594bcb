//! Trade records produced by the matcher.
//!
//! A [`Trade`] references the two orders that crossed but never owns them;
//! either order may keep resting, partially filled, after the fill.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MarketPair, OrderId, OrderSide, TradeId};

/// An immutable fill between one buy order and one sell order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub market: MarketPair,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// Exchanged quantity: min of both remaining amounts at match time.
    pub amount: Decimal,
    /// Execution price chosen by the book's price policy.
    pub price: Decimal,
    /// Side of the incoming order that triggered the crossing.
    pub taker_side: OrderSide,
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    /// Quote value exchanged (price x amount).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }

    /// Fee charged at `rate` on the notional.
    #[must_use]
    pub fn fee(&self, rate: Decimal) -> Decimal {
        self.notional() * rate
    }

    /// The aggressor's order.
    #[must_use]
    pub fn taker_order_id(&self) -> OrderId {
        match self.taker_side {
            OrderSide::Buy => self.buy_order_id,
            OrderSide::Sell => self.sell_order_id,
        }
    }

    /// The resting order.
    #[must_use]
    pub fn maker_order_id(&self) -> OrderId {
        match self.taker_side {
            OrderSide::Buy => self.sell_order_id,
            OrderSide::Sell => self.buy_order_id,
        }
    }

    #[must_use]
    pub fn involves(&self, order_id: &OrderId) -> bool {
        self.buy_order_id == *order_id || self.sell_order_id == *order_id
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trade[{}] {} {} {} @ {} = {}",
            self.id,
            self.market,
            self.taker_side,
            self.amount,
            self.price,
            self.notional(),
        )
    }
}

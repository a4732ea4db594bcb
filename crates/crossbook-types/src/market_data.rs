//! Read-only snapshots handed to market-data consumers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MarketPair;

/// Statistics derived from the trade stream since the book was created.
///
/// Despite the "24h" naming used by consumers, these are cumulative;
/// nothing decays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeStats {
    pub last_price: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    /// Sum of traded amounts (base asset).
    pub volume: Decimal,
    /// Sum of trade notionals (quote asset).
    pub quote_volume: Decimal,
    pub trade_count: u64,
}

impl TradeStats {
    /// Volume-weighted average price, `None` before the first trade.
    #[must_use]
    pub fn vwap(&self) -> Option<Decimal> {
        if self.volume.is_zero() {
            None
        } else {
            Some(self.quote_volume / self.volume)
        }
    }
}

/// Top-of-book plus trade statistics at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    pub market: MarketPair,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub spread: Option<Decimal>,
    pub trades: TradeStats,
    pub timestamp: DateTime<Utc>,
}

/// One aggregated price level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: Decimal,
    /// Total remaining amount resting at this price.
    pub amount: Decimal,
    pub order_count: usize,
}

/// Aggregated view of both sides, best level first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDepth {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

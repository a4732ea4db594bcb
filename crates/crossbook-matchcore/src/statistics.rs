//! Running statistics over the trade stream.

use crossbook_types::{Trade, TradeStats};
use rust_decimal::Decimal;

/// Derives last price, high, low and cumulative volume from trades.
///
/// Values accumulate from construction; there is no time window.
#[derive(Debug, Clone, Default)]
pub struct StatisticsTracker {
    stats: TradeStats,
}

impl StatisticsTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one trade into the running statistics.
    ///
    /// Never panics: volumes that leave `Decimal`'s range stick at
    /// `Decimal::MAX`.
    pub fn record(&mut self, trade: &Trade) {
        let s = &mut self.stats;
        s.last_price = Some(trade.price);
        s.high = Some(s.high.map_or(trade.price, |h| h.max(trade.price)));
        s.low = Some(s.low.map_or(trade.price, |l| l.min(trade.price)));

        let notional = trade.price.checked_mul(trade.amount);
        let volume = s.volume.checked_add(trade.amount);
        let quote_volume = notional.and_then(|n| s.quote_volume.checked_add(n));
        if volume.is_none() || quote_volume.is_none() {
            tracing::warn!(
                trade_id = %trade.id,
                price = %trade.price,
                amount = %trade.amount,
                "Trade volume overflowed, saturating statistics"
            );
        }
        s.volume = volume.unwrap_or(Decimal::MAX);
        s.quote_volume = quote_volume.unwrap_or(Decimal::MAX);
        s.trade_count = s.trade_count.saturating_add(1);
    }

    #[must_use]
    pub fn snapshot(&self) -> TradeStats {
        self.stats.clone()
    }

    #[must_use]
    pub fn stats(&self) -> &TradeStats {
        &self.stats
    }
}

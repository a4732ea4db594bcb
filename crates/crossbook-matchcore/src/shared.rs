//! A cloneable, thread-safe handle to one [`OrderBook`].
//!
//! One coarse `RwLock` guards the whole book:
//! - `submit` / `cancel` hold the write lock for the full submit-then-match
//!   sequence
//! - queries share the read lock
//!
//! `parking_lot::RwLock` is task-fair, so a stream of market-maker writes
//! or market-data reads cannot starve a user's cancel.
//!
//! Trades are published on a `tokio::sync::broadcast` channel while the
//! write lock is still held, so subscribers see them in execution order.
//! Sending never blocks; a subscriber that falls behind observes
//! `RecvError::Lagged`.

use std::sync::Arc;

use crossbook_types::{
    BookConfig, BookDepth, MarketStats, Order, OrderId, OrderSide, OrderStatus, Result, Trade,
};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tokio::sync::broadcast;

use crate::{OrderBook, SubmitOutcome};

/// Shared handle to a single book. Clone it into every caller.
#[derive(Debug, Clone)]
pub struct SharedBook {
    book: Arc<RwLock<OrderBook>>,
    trades: broadcast::Sender<Trade>,
}

impl SharedBook {
    pub fn new(config: BookConfig) -> Result<Self> {
        config.validate()?;
        let (trades, _) = broadcast::channel(config.trade_channel_capacity);
        Ok(Self {
            book: Arc::new(RwLock::new(OrderBook::with_config(config))),
            trades,
        })
    }

    // =================================================================
    // Writers
    // =================================================================

    pub fn submit(
        &self,
        side: OrderSide,
        price: Decimal,
        amount: Decimal,
    ) -> Result<SubmitOutcome> {
        let mut book = self.book.write();
        let outcome = book.submit(side, price, amount)?;
        for trade in &outcome.trades {
            // Err only means nobody is subscribed.
            let _ = self.trades.send(trade.clone());
        }
        Ok(outcome)
    }

    pub fn cancel(&self, order_id: &OrderId) -> Result<Order> {
        self.book.write().cancel(order_id)
    }

    // =================================================================
    // Readers
    // =================================================================

    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.book.read().best_bid()
    }

    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.book.read().best_ask()
    }

    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        self.book.read().spread()
    }

    #[must_use]
    pub fn mid_price(&self) -> Option<Decimal> {
        self.book.read().mid_price()
    }

    #[must_use]
    pub fn order(&self, order_id: &OrderId) -> Option<Order> {
        self.book.read().order(order_id)
    }

    #[must_use]
    pub fn status(&self, order_id: &OrderId) -> Option<OrderStatus> {
        self.book.read().status(order_id)
    }

    #[must_use]
    pub fn stats(&self) -> MarketStats {
        self.book.read().stats()
    }

    #[must_use]
    pub fn depth(&self, levels: usize) -> BookDepth {
        self.book.read().depth(levels)
    }

    /// Run `f` against a consistent view of the book under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&OrderBook) -> R) -> R {
        f(&self.book.read())
    }

    // =================================================================
    // Trade stream
    // =================================================================

    /// Receive every trade executed after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Trade> {
        self.trades.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.trades.receiver_count()
    }
}

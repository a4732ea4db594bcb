//! The continuous order book for a single market.
//!
//! Two [`PriceQueue`]s hold the resting orders. Every accepted submission
//! runs the crossing loop to exhaustion before returning, so between calls
//! the book never crosses: `best_bid < best_ask` whenever both sides exist.
//!
//! Completed and cancelled orders leave the queues. A bounded FIFO keeps
//! their final snapshots so [`OrderBook::cancel`] can report
//! `OrderNotCancellable` rather than `OrderNotFound`.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use crossbook_types::{
    BookConfig, BookDepth, CrossbookError, DepthLevel, ExecutionPricePolicy, MarketPair,
    MarketStats, Order, OrderId, OrderSide, OrderStatus, Result, Trade, TradeId, TradeStats,
    constants,
};
use rust_decimal::Decimal;

use crate::{PriceQueue, StatisticsTracker};

/// What a submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The submitted order after matching. It may already be `Completed`.
    pub order: Order,
    /// Fills caused by this submission, in execution order.
    pub trades: Vec<Trade>,
}

impl SubmitOutcome {
    #[must_use]
    pub fn filled_amount(&self) -> Decimal {
        self.trades.iter().map(|t| t.amount).sum()
    }
}

/// The order book for a single market.
#[derive(Debug)]
pub struct OrderBook {
    config: BookConfig,
    bids: PriceQueue,
    asks: PriceQueue,
    stats: StatisticsTracker,
    next_sequence: u64,
    /// Final snapshots of completed / cancelled orders.
    retired: HashMap<OrderId, Order>,
    /// Retirement order for eviction (front = oldest).
    retired_fifo: VecDeque<OrderId>,
}

impl OrderBook {
    /// Create a new empty book for the given market with default settings.
    #[must_use]
    pub fn new(market: MarketPair) -> Self {
        Self::with_config(BookConfig::for_market(market))
    }

    #[must_use]
    pub fn with_config(config: BookConfig) -> Self {
        Self {
            config,
            bids: PriceQueue::bids(),
            asks: PriceQueue::asks(),
            stats: StatisticsTracker::new(),
            next_sequence: 0,
            retired: HashMap::new(),
            retired_fifo: VecDeque::new(),
        }
    }

    // =================================================================
    // Submission
    // =================================================================

    /// Accept a limit order and match it against the opposite side.
    pub fn submit(
        &mut self,
        side: OrderSide,
        price: Decimal,
        amount: Decimal,
    ) -> Result<SubmitOutcome> {
        if let Err(err) = validate(price, amount) {
            tracing::warn!(%side, %price, %amount, error = %err, "Order rejected");
            return Err(err);
        }

        let order = Order::new(
            self.config.market.clone(),
            side,
            price,
            amount,
            self.next_sequence,
        );
        self.next_sequence += 1;
        let order_id = order.id;

        tracing::debug!(
            order_id = %order_id,
            %side,
            %price,
            %amount,
            sequence = order.sequence,
            "Order accepted"
        );

        let mut snapshot = order.clone();
        self.queue_mut(side).push(order)?;
        let trades = self.match_orders(side);

        // Every crossing involves the incoming order: the book did not
        // cross before it arrived.
        for trade in trades.iter().filter(|t| t.involves(&order_id)) {
            snapshot.remaining_amount -= trade.amount;
            snapshot.updated_at = trade.executed_at;
        }
        if snapshot.remaining_amount.is_zero() {
            snapshot.status = OrderStatus::Completed;
        }

        Ok(SubmitOutcome {
            order: snapshot,
            trades,
        })
    }

    // =================================================================
    // Cancellation
    // =================================================================

    /// Cancel a pending order. Returns its final snapshot.
    ///
    /// Never triggers matching.
    pub fn cancel(&mut self, order_id: &OrderId) -> Result<Order> {
        let removed = match self.bids.remove(order_id) {
            Some(order) => Some(order),
            None => self.asks.remove(order_id),
        };

        let Some(mut order) = removed else {
            return Err(match self.retired.get(order_id) {
                Some(done) => CrossbookError::OrderNotCancellable {
                    id: *order_id,
                    status: done.status,
                },
                None => CrossbookError::OrderNotFound(*order_id),
            });
        };

        order.status = OrderStatus::Cancelled;
        order.updated_at = Utc::now();
        tracing::info!(
            order_id = %order.id,
            side = %order.side,
            price = %order.price,
            remaining = %order.remaining_amount,
            "Order cancelled"
        );
        self.retire(order.clone());
        Ok(order)
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Best (highest) bid price, or `None` if no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.peek_best().map(|o| o.price)
    }

    /// Best (lowest) ask price, or `None` if no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.peek_best().map(|o| o.price)
    }

    /// Spread = best_ask - best_bid. `None` if either side is empty.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Mid price = (best_bid + best_ask) / 2. `None` if either side is empty.
    #[must_use]
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(bid / Decimal::TWO + ask / Decimal::TWO),
            _ => None,
        }
    }

    /// Current snapshot of a resting order, or the final snapshot of a
    /// retained completed / cancelled one.
    #[must_use]
    pub fn order(&self, order_id: &OrderId) -> Option<Order> {
        self.bids
            .get(order_id)
            .or_else(|| self.asks.get(order_id))
            .or_else(|| self.retired.get(order_id))
            .cloned()
    }

    #[must_use]
    pub fn status(&self, order_id: &OrderId) -> Option<OrderStatus> {
        if self.bids.contains(order_id) || self.asks.contains(order_id) {
            return Some(OrderStatus::Pending);
        }
        self.retired.get(order_id).map(|o| o.status)
    }

    #[must_use]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    #[must_use]
    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    /// Total number of resting orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    #[must_use]
    pub fn bids(&self) -> &PriceQueue {
        &self.bids
    }

    #[must_use]
    pub fn asks(&self) -> &PriceQueue {
        &self.asks
    }

    #[must_use]
    pub fn market(&self) -> &MarketPair {
        &self.config.market
    }

    #[must_use]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    #[must_use]
    pub fn trade_stats(&self) -> TradeStats {
        self.stats.snapshot()
    }

    /// Top of book plus cumulative trade statistics.
    #[must_use]
    pub fn stats(&self) -> MarketStats {
        MarketStats {
            market: self.config.market.clone(),
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            spread: self.spread(),
            trades: self.stats.snapshot(),
            timestamp: Utc::now(),
        }
    }

    /// Up to `levels` aggregated price levels per side, best first.
    #[must_use]
    pub fn depth(&self, levels: usize) -> BookDepth {
        BookDepth {
            bids: aggregate_levels(&self.bids, levels),
            asks: aggregate_levels(&self.asks, levels),
        }
    }

    // =================================================================
    // Matching
    // =================================================================

    /// Cross the book until the best bid is below the best ask.
    ///
    /// Each iteration completes at least one order, so the loop runs at
    /// most once per order resting opposite the taker.
    fn match_orders(&mut self, taker_side: OrderSide) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            let (Some(bid), Some(ask)) = (self.bids.peek_best(), self.asks.peek_best()) else {
                break;
            };
            if bid.price < ask.price {
                break;
            }

            let amount = bid.remaining_amount.min(ask.remaining_amount);
            let price = match (self.config.price_policy, taker_side) {
                (ExecutionPricePolicy::Ask, _) | (ExecutionPricePolicy::Resting, OrderSide::Buy) => {
                    ask.price
                }
                (ExecutionPricePolicy::Resting, OrderSide::Sell) => bid.price,
            };

            let trade = Trade {
                id: TradeId::new(),
                market: self.config.market.clone(),
                buy_order_id: bid.id,
                sell_order_id: ask.id,
                amount,
                price,
                taker_side,
                executed_at: Utc::now(),
            };

            // Record before touching the queues: a trade is either fully
            // applied or not at all.
            self.stats.record(&trade);

            let now = trade.executed_at;
            if let Some(done) = fill_best(&mut self.bids, amount, now) {
                self.retire(done);
            }
            if let Some(done) = fill_best(&mut self.asks, amount, now) {
                self.retire(done);
            }

            tracing::debug!(
                trade_id = %trade.id,
                buy_order = %trade.buy_order_id,
                sell_order = %trade.sell_order_id,
                price = %trade.price,
                amount = %trade.amount,
                taker = %trade.taker_side,
                "Trade matched"
            );
            trades.push(trade);
        }

        trades
    }

    fn queue_mut(&mut self, side: OrderSide) -> &mut PriceQueue {
        match side {
            OrderSide::Buy => &mut self.bids,
            OrderSide::Sell => &mut self.asks,
        }
    }

    fn retire(&mut self, order: Order) {
        let capacity = self.config.terminal_retention;
        if capacity == 0 {
            return;
        }
        if self.retired.len() >= capacity {
            if let Some(oldest) = self.retired_fifo.pop_front() {
                self.retired.remove(&oldest);
            }
        }
        self.retired_fifo.push_back(order.id);
        self.retired.insert(order.id, order);
    }
}

/// Reject non-positive, oversized or over-precise inputs before they touch
/// the queues.
fn validate(price: Decimal, amount: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(CrossbookError::InvalidOrder {
            reason: format!("price must be positive, got {price}"),
        });
    }
    if amount <= Decimal::ZERO {
        return Err(CrossbookError::InvalidOrder {
            reason: format!("amount must be positive, got {amount}"),
        });
    }
    if price > Decimal::from(constants::MAX_PRICE) {
        return Err(CrossbookError::InvalidOrder {
            reason: format!("price {price} exceeds maximum {}", constants::MAX_PRICE),
        });
    }
    if amount > Decimal::from(constants::MAX_AMOUNT) {
        return Err(CrossbookError::InvalidOrder {
            reason: format!("amount {amount} exceeds maximum {}", constants::MAX_AMOUNT),
        });
    }
    if price.normalize().scale() > constants::PRICE_PRECISION {
        return Err(CrossbookError::InvalidOrder {
            reason: format!(
                "price {price} exceeds {} decimal places",
                constants::PRICE_PRECISION
            ),
        });
    }
    if amount.normalize().scale() > constants::AMOUNT_PRECISION {
        return Err(CrossbookError::InvalidOrder {
            reason: format!(
                "amount {amount} exceeds {} decimal places",
                constants::AMOUNT_PRECISION
            ),
        });
    }
    Ok(())
}

/// Decrement the best order of `queue`; pop and return it once filled.
fn fill_best(queue: &mut PriceQueue, amount: Decimal, now: DateTime<Utc>) -> Option<Order> {
    let order = queue.peek_best_mut()?;
    order.remaining_amount -= amount;
    order.updated_at = now;
    if !order.remaining_amount.is_zero() {
        return None;
    }

    let mut done = queue.pop_best().ok()?;
    done.status = OrderStatus::Completed;
    Some(done)
}

fn aggregate_levels(queue: &PriceQueue, levels: usize) -> Vec<DepthLevel> {
    let mut out: Vec<DepthLevel> = Vec::new();
    for order in queue.sorted() {
        match out.last_mut() {
            Some(level) if level.price == order.price => {
                level.amount += order.remaining_amount;
                level.order_count += 1;
            }
            _ => {
                if out.len() == levels {
                    break;
                }
                out.push(DepthLevel {
                    price: order.price,
                    amount: order.remaining_amount,
                    order_count: 1,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crossbook_types::*;
    use rust_decimal::Decimal;

    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn book() -> OrderBook {
        OrderBook::new(MarketPair::new("BTC", "USDT"))
    }

    #[test]
    fn empty_book() {
        let book = book();
        assert!(book.is_empty());
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.spread(), None);
        assert_eq!(book.mid_price(), None);
        assert!(book.depth(5).bids.is_empty());
    }

    #[test]
    fn single_bid_rests() {
        let mut book = book();
        let out = book.submit(OrderSide::Buy, dec(100), dec(10)).unwrap();
        assert!(out.trades.is_empty());
        assert_eq!(out.order.status, OrderStatus::Pending);
        assert_eq!(book.bid_count(), 1);
        assert_eq!(book.best_bid(), Some(dec(100)));
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.spread(), None);
    }

    #[test]
    fn exact_cross_completes_both() {
        let mut book = book();
        let ask = book.submit(OrderSide::Sell, dec(100), dec(5)).unwrap().order;
        let out = book.submit(OrderSide::Buy, dec(101), dec(5)).unwrap();

        assert_eq!(out.trades.len(), 1);
        let trade = &out.trades[0];
        assert_eq!(trade.amount, dec(5));
        assert_eq!(trade.price, dec(100), "resting ask sets the price");
        assert_eq!(trade.sell_order_id, ask.id);
        assert_eq!(trade.taker_side, OrderSide::Buy);
        assert_eq!(out.order.status, OrderStatus::Completed);
        assert_eq!(book.status(&ask.id), Some(OrderStatus::Completed));
        assert!(book.is_empty());
    }

    #[test]
    fn partial_fill_leaves_aggressor_resting() {
        let mut book = book();
        let ask = book.submit(OrderSide::Sell, dec(100), dec(3)).unwrap().order;
        let out = book.submit(OrderSide::Buy, dec(101), dec(5)).unwrap();

        assert_eq!(out.trades.len(), 1);
        assert_eq!(out.trades[0].amount, dec(3));
        assert_eq!(out.order.status, OrderStatus::Pending);
        assert_eq!(out.order.remaining_amount, dec(2));
        assert!(out.order.is_partially_filled());
        assert_eq!(book.status(&ask.id), Some(OrderStatus::Completed));
        assert_eq!(book.ask_count(), 0);
        assert_eq!(book.bid_count(), 1);
        assert_eq!(book.best_bid(), Some(dec(101)));
    }

    #[test]
    fn sell_aggressor_trades_at_resting_bid() {
        let mut book = book();
        book.submit(OrderSide::Buy, dec(105), dec(1)).unwrap();
        let out = book.submit(OrderSide::Sell, dec(100), dec(1)).unwrap();
        assert_eq!(out.trades[0].price, dec(105));
        assert_eq!(out.trades[0].taker_side, OrderSide::Sell);
    }

    #[test]
    fn ask_policy_always_uses_ask_price() {
        let mut book = OrderBook::with_config(BookConfig {
            price_policy: ExecutionPricePolicy::Ask,
            ..BookConfig::default()
        });
        book.submit(OrderSide::Buy, dec(105), dec(1)).unwrap();
        let out = book.submit(OrderSide::Sell, dec(100), dec(1)).unwrap();
        assert_eq!(out.trades[0].price, dec(100));
    }

    #[test]
    fn aggressor_sweeps_levels_in_priority_order() {
        let mut book = book();
        let a1 = book.submit(OrderSide::Sell, dec(102), dec(1)).unwrap().order;
        let a2 = book.submit(OrderSide::Sell, dec(100), dec(1)).unwrap().order;
        let a3 = book.submit(OrderSide::Sell, dec(101), dec(1)).unwrap().order;
        book.submit(OrderSide::Sell, dec(110), dec(1)).unwrap();

        let out = book.submit(OrderSide::Buy, dec(105), dec(5)).unwrap();
        let sells: Vec<OrderId> = out.trades.iter().map(|t| t.sell_order_id).collect();
        assert_eq!(sells, vec![a2.id, a3.id, a1.id]);
        let prices: Vec<Decimal> = out.trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![dec(100), dec(101), dec(102)]);
        assert_eq!(out.order.remaining_amount, dec(2));
        assert_eq!(book.best_bid(), Some(dec(105)));
        assert_eq!(book.best_ask(), Some(dec(110)));
    }

    #[test]
    fn equal_price_fills_fifo() {
        let mut book = book();
        let first = book.submit(OrderSide::Buy, dec(100), dec(1)).unwrap().order;
        let second = book.submit(OrderSide::Buy, dec(100), dec(1)).unwrap().order;

        let out = book.submit(OrderSide::Sell, dec(100), dec(1)).unwrap();
        assert_eq!(out.trades[0].buy_order_id, first.id);
        assert_eq!(book.status(&second.id), Some(OrderStatus::Pending));
    }

    #[test]
    fn no_cross_reports_spread() {
        let mut book = book();
        book.submit(OrderSide::Buy, dec(50), dec(1)).unwrap();
        let out = book.submit(OrderSide::Sell, dec(60), dec(1)).unwrap();
        assert!(out.trades.is_empty());
        assert_eq!(book.spread(), Some(dec(10)));
        assert_eq!(book.mid_price(), Some(dec(55)));
    }

    #[test]
    fn cancel_then_no_cross() {
        let mut book = book();
        let bid = book.submit(OrderSide::Buy, dec(50), dec(1)).unwrap().order;
        let cancelled = book.cancel(&bid.id).unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let out = book.submit(OrderSide::Sell, dec(40), dec(1)).unwrap();
        assert!(out.trades.is_empty());
        assert_eq!(book.ask_count(), 1);
        assert_eq!(book.bid_count(), 0);
    }

    #[test]
    fn cancel_completed_is_not_cancellable() {
        let mut book = book();
        let ask = book.submit(OrderSide::Sell, dec(100), dec(1)).unwrap().order;
        book.submit(OrderSide::Buy, dec(100), dec(1)).unwrap();

        let err = book.cancel(&ask.id).unwrap_err();
        assert!(matches!(
            err,
            CrossbookError::OrderNotCancellable { status: OrderStatus::Completed, .. }
        ));
    }

    #[test]
    fn cancel_twice_is_not_cancellable() {
        let mut book = book();
        let bid = book.submit(OrderSide::Buy, dec(100), dec(1)).unwrap().order;
        book.cancel(&bid.id).unwrap();
        let err = book.cancel(&bid.id).unwrap_err();
        assert!(matches!(
            err,
            CrossbookError::OrderNotCancellable { status: OrderStatus::Cancelled, .. }
        ));
    }

    #[test]
    fn cancel_unknown_is_not_found() {
        let mut book = book();
        book.submit(OrderSide::Buy, dec(100), dec(1)).unwrap();
        let err = book.cancel(&OrderId::new()).unwrap_err();
        assert!(matches!(err, CrossbookError::OrderNotFound(_)));
        assert_eq!(book.bid_count(), 1);
    }

    #[test]
    fn retention_evicts_oldest() {
        let mut book = OrderBook::with_config(BookConfig {
            terminal_retention: 2,
            ..BookConfig::default()
        });

        let ids: Vec<OrderId> = (0..3)
            .map(|_| {
                let id = book.submit(OrderSide::Buy, dec(10), dec(1)).unwrap().order.id;
                book.cancel(&id).unwrap();
                id
            })
            .collect();

        assert!(matches!(
            book.cancel(&ids[0]),
            Err(CrossbookError::OrderNotFound(_))
        ));
        assert!(matches!(
            book.cancel(&ids[2]),
            Err(CrossbookError::OrderNotCancellable { .. })
        ));
    }

    #[test]
    fn completed_aggressor_reported_without_retention() {
        let mut book = OrderBook::with_config(BookConfig {
            terminal_retention: 0,
            ..BookConfig::default()
        });
        let ask = book.submit(OrderSide::Sell, dec(10), dec(1)).unwrap().order;
        let out = book.submit(OrderSide::Buy, dec(10), dec(1)).unwrap();
        assert_eq!(out.order.status, OrderStatus::Completed);
        assert!(out.order.is_filled());
        // Nothing remembered, so the maker is simply unknown now.
        assert!(matches!(
            book.cancel(&ask.id),
            Err(CrossbookError::OrderNotFound(_))
        ));
    }

    #[test]
    fn invalid_orders_never_touch_queues() {
        let mut book = book();
        for (price, amount) in [(dec(0), dec(1)), (dec(1), dec(0)), (dec(-1), dec(1))] {
            let err = book.submit(OrderSide::Buy, price, amount).unwrap_err();
            assert!(matches!(err, CrossbookError::InvalidOrder { .. }));
        }
        let too_precise = Decimal::new(1, 9);
        assert!(book.submit(OrderSide::Sell, too_precise, dec(1)).is_err());
        assert!(book.submit(OrderSide::Sell, dec(1), too_precise).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn oversized_orders_rejected_before_matching() {
        let mut book = book();
        let resting = book.submit(OrderSide::Sell, dec(100), dec(2)).unwrap().order;
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);

        for (price, amount) in [(huge, dec(2)), (dec(100), huge)] {
            let err = book.submit(OrderSide::Buy, price, amount).unwrap_err();
            assert!(matches!(err, CrossbookError::InvalidOrder { .. }));
        }
        assert_eq!(book.status(&resting.id), Some(OrderStatus::Pending));
        assert_eq!(book.order(&resting.id).unwrap().remaining_amount, dec(2));
        assert_eq!(book.trade_stats().trade_count, 0);
    }

    #[test]
    fn largest_orders_cross_cleanly() {
        let mut book = book();
        let max_price = Decimal::from(constants::MAX_PRICE);
        let max_amount = Decimal::from(constants::MAX_AMOUNT);

        let ask = book.submit(OrderSide::Sell, max_price, max_amount).unwrap().order;
        let out = book.submit(OrderSide::Buy, max_price, max_amount).unwrap();

        assert_eq!(out.trades.len(), 1);
        assert_eq!(out.order.status, OrderStatus::Completed);
        assert_eq!(book.status(&ask.id), Some(OrderStatus::Completed));
        let stats = book.trade_stats();
        assert_eq!(stats.trade_count, 1);
        assert_eq!(stats.volume, max_amount);
        assert_eq!(stats.quote_volume, max_price * max_amount);
    }

    #[test]
    fn mid_price_at_price_ceiling() {
        let mut book = book();
        let max_price = Decimal::from(constants::MAX_PRICE);
        book.submit(OrderSide::Buy, max_price - dec(2), dec(1)).unwrap();
        book.submit(OrderSide::Sell, max_price, dec(1)).unwrap();
        assert_eq!(book.mid_price(), Some(max_price - dec(1)));
    }

    #[test]
    fn mid_price_keeps_half_ticks() {
        let mut book = book();
        book.submit(OrderSide::Buy, dec(100), dec(1)).unwrap();
        book.submit(OrderSide::Sell, dec(101), dec(1)).unwrap();
        assert_eq!(book.mid_price(), Some(Decimal::new(1005, 1)));
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        let mut book = book();
        // 1.0000000000 normalises to 1
        let price = Decimal::new(10_000_000_000, 10);
        assert!(book.submit(OrderSide::Buy, price, dec(1)).is_ok());
    }

    #[test]
    fn stats_follow_trades() {
        let mut book = book();
        book.submit(OrderSide::Sell, dec(100), dec(2)).unwrap();
        book.submit(OrderSide::Sell, dec(90), dec(1)).unwrap();
        book.submit(OrderSide::Buy, dec(100), dec(3)).unwrap();

        let stats = book.stats();
        assert_eq!(stats.trades.trade_count, 2);
        assert_eq!(stats.trades.volume, dec(3));
        assert_eq!(stats.trades.high, Some(dec(100)));
        assert_eq!(stats.trades.low, Some(dec(90)));
        assert_eq!(stats.trades.last_price, Some(dec(100)));
        assert_eq!(stats.best_bid, None);
    }

    #[test]
    fn depth_aggregates_levels() {
        let mut book = book();
        book.submit(OrderSide::Buy, dec(100), dec(1)).unwrap();
        book.submit(OrderSide::Buy, dec(100), dec(2)).unwrap();
        book.submit(OrderSide::Buy, dec(99), dec(4)).unwrap();
        book.submit(OrderSide::Buy, dec(98), dec(1)).unwrap();
        book.submit(OrderSide::Sell, dec(101), dec(7)).unwrap();

        let depth = book.depth(2);
        assert_eq!(
            depth.bids,
            vec![
                DepthLevel { price: dec(100), amount: dec(3), order_count: 2 },
                DepthLevel { price: dec(99), amount: dec(4), order_count: 1 },
            ]
        );
        assert_eq!(depth.asks.len(), 1);
        assert_eq!(depth.asks[0].amount, dec(7));
    }

    #[test]
    fn order_lookup_covers_resting_and_retired() {
        let mut book = book();
        let resting = book.submit(OrderSide::Buy, dec(10), dec(5)).unwrap().order;
        book.submit(OrderSide::Sell, dec(10), dec(2)).unwrap();

        let snapshot = book.order(&resting.id).unwrap();
        assert_eq!(snapshot.remaining_amount, dec(3));
        assert_eq!(snapshot.status, OrderStatus::Pending);

        book.cancel(&resting.id).unwrap();
        let snapshot = book.order(&resting.id).unwrap();
        assert_eq!(snapshot.status, OrderStatus::Cancelled);
        assert_eq!(snapshot.remaining_amount, dec(3));
    }
}

//! Periodic market-maker agent.
//!
//! The agent is just another caller of [`SharedBook`]: every tick it reads
//! a reference price, computes a [`Quote`] and submits one BUY and one SELL.
//! It competes for the same book lock as user orders.
//!
//! ## Lifecycle
//!
//! ```text
//! MarketMaker::new(book, cfg)?.spawn() -> MarketMakerHandle
//!     handle.adjust(cfg)   // picked up by the next tick
//!     handle.stop().await  // stop signal, then join
//! ```
//!
//! Dropping the handle also stops the task: both watch channels close.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbook_matchcore::{SharedBook, SubmitOutcome};
use crossbook_types::{CrossbookError, MarketMakerConfig, OrderSide, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use crate::quote::{Quote, quote};

/// What one tick placed.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub quote: Quote,
    pub bid: SubmitOutcome,
    pub ask: SubmitOutcome,
}

impl TickReport {
    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.bid.trades.len() + self.ask.trades.len()
    }
}

/// A market maker bound to one book.
#[derive(Debug)]
pub struct MarketMaker {
    book: SharedBook,
    config: MarketMakerConfig,
    rng: StdRng,
}

impl MarketMaker {
    pub fn new(book: SharedBook, config: MarketMakerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            book,
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Replace the entropy-seeded RNG for reproducible quotes.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn config(&self) -> &MarketMakerConfig {
        &self.config
    }

    /// Reference price: two-sided mid, else the last trade, else `None`.
    fn reference_price(&self) -> Option<Decimal> {
        self.book
            .read(|b| b.mid_price().or_else(|| b.trade_stats().last_price))
    }

    /// Place one quote pair immediately.
    pub fn tick(&mut self) -> Result<TickReport> {
        let quote = quote(self.reference_price(), &self.config, &mut self.rng);
        let bid = self
            .book
            .submit(OrderSide::Buy, quote.bid_price, quote.volume)?;
        let ask = self
            .book
            .submit(OrderSide::Sell, quote.ask_price, quote.volume)?;

        tracing::debug!(
            bid = %quote.bid_price,
            ask = %quote.ask_price,
            volume = %quote.volume,
            trades = bid.trades.len() + ask.trades.len(),
            "Market maker quoted"
        );
        Ok(TickReport { quote, bid, ask })
    }

    /// Run on the current tokio runtime until stopped.
    #[must_use]
    pub fn spawn(self) -> MarketMakerHandle {
        let (params_tx, params_rx) = watch::channel(self.config.clone());
        let (stop_tx, stop_rx) = watch::channel(false);
        let ticks = Arc::new(AtomicU64::new(0));

        tracing::info!(
            spread = %self.config.spread,
            volume = %self.config.volume,
            interval_ms = self.config.interval_ms,
            "Market maker started"
        );
        let task = tokio::spawn(self.run(params_rx, stop_rx, Arc::clone(&ticks)));

        MarketMakerHandle {
            params: params_tx,
            stop: stop_tx,
            ticks,
            task,
        }
    }

    async fn run(
        mut self,
        mut params: watch::Receiver<MarketMakerConfig>,
        mut stop: watch::Receiver<bool>,
        ticks: Arc<AtomicU64>,
    ) {
        let mut ticker = new_interval(self.config.interval_ms);

        loop {
            tokio::select! {
                biased;

                _ = stop.changed() => break,

                changed = params.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let next = params.borrow_and_update().clone();
                    if next.interval_ms != self.config.interval_ms {
                        ticker = new_interval(next.interval_ms);
                    }
                    tracing::info!(
                        spread = %next.spread,
                        volume = %next.volume,
                        interval_ms = next.interval_ms,
                        "Market maker parameters adjusted"
                    );
                    self.config = next;
                }

                _ = ticker.tick() => {
                    if *stop.borrow() {
                        break;
                    }
                    if let Err(err) = self.tick() {
                        tracing::warn!(error = %err, "Market maker tick failed");
                    }
                    ticks.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        tracing::info!(ticks = ticks.load(Ordering::Relaxed), "Market maker stopped");
    }
}

fn new_interval(ms: u64) -> Interval {
    let mut ticker = tokio::time::interval(Duration::from_millis(ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Control handle for a spawned [`MarketMaker`].
#[derive(Debug)]
pub struct MarketMakerHandle {
    params: watch::Sender<MarketMakerConfig>,
    stop: watch::Sender<bool>,
    ticks: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl MarketMakerHandle {
    /// Swap quoting parameters. Safe while a tick is in flight: that tick
    /// finishes with the old values, the next one uses these.
    pub fn adjust(&self, config: MarketMakerConfig) -> Result<()> {
        config.validate()?;
        self.params.send_replace(config);
        Ok(())
    }

    #[must_use]
    pub fn params(&self) -> MarketMakerConfig {
        self.params.borrow().clone()
    }

    /// Completed ticks so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the agent to stop and wait for it. Returns the tick count.
    pub async fn stop(self) -> Result<u64> {
        self.stop.send_replace(true);
        self.task
            .await
            .map_err(|e| CrossbookError::Internal(format!("market maker task failed: {e}")))?;
        Ok(self.ticks.load(Ordering::Relaxed))
    }
}

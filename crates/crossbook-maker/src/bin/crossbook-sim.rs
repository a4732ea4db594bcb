//! `crossbook-sim`: run a market maker against a fresh book and log the
//! resulting trades.
//!
//! ```text
//! crossbook-sim [config.json]
//! RUST_LOG=crossbook_matchcore=debug crossbook-sim
//! ```

use std::time::Duration;

use crossbook_maker::MarketMaker;
use crossbook_matchcore::SharedBook;
use crossbook_types::{CrossbookError, OrderSide, Result, SimConfig, constants};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_json_file(&path)?,
        None => SimConfig::default(),
    };

    tracing::info!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        market = %config.book.market,
        policy = ?config.book.price_policy,
        run_ms = config.run_ms,
        "Starting simulation"
    );

    let book = SharedBook::new(config.book.clone())?;
    let mut trades = book.subscribe();
    let listener = tokio::spawn(async move {
        let mut seen = 0u64;
        loop {
            match trades.recv().await {
                Ok(trade) => {
                    seen += 1;
                    tracing::info!(%trade, "Trade");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Trade listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        seen
    });

    let maker = MarketMaker::new(book.clone(), config.maker.clone())?.spawn();
    let taker = tokio::spawn(take_liquidity(
        book.clone(),
        (config.maker.volume / Decimal::TWO).round_dp(constants::AMOUNT_PRECISION),
        Duration::from_millis(config.maker.interval_ms.saturating_mul(2)),
        Duration::from_millis(config.run_ms),
    ));

    tokio::time::sleep(Duration::from_millis(config.run_ms)).await;

    let maker_ticks = maker.stop().await?;
    let taker_orders = taker
        .await
        .map_err(|e| CrossbookError::Internal(e.to_string()))?;

    let stats = book.stats();
    let depth = book.depth(5);
    tracing::info!(
        maker_ticks,
        taker_orders,
        trades = stats.trades.trade_count,
        volume = %stats.trades.volume,
        last = ?stats.trades.last_price,
        high = ?stats.trades.high,
        low = ?stats.trades.low,
        best_bid = ?stats.best_bid,
        best_ask = ?stats.best_ask,
        bid_levels = depth.bids.len(),
        ask_levels = depth.asks.len(),
        "Simulation finished"
    );

    drop(book);
    let streamed = listener
        .await
        .map_err(|e| CrossbookError::Internal(e.to_string()))?;
    tracing::info!(streamed, "Trade listener done");
    Ok(())
}

/// Lift the best offer or hit the best bid at random until `run_for`
/// elapses. Returns how many orders were sent.
async fn take_liquidity(
    book: SharedBook,
    volume: Decimal,
    every: Duration,
    run_for: Duration,
) -> u64 {
    let mut rng = StdRng::from_entropy();
    let deadline = tokio::time::Instant::now() + run_for;
    let mut ticker = tokio::time::interval(every);
    let mut sent = 0u64;

    while tokio::time::Instant::now() < deadline {
        ticker.tick().await;
        let (side, price) = if rng.gen_bool(0.5) {
            (OrderSide::Buy, book.best_ask())
        } else {
            (OrderSide::Sell, book.best_bid())
        };
        let Some(price) = price else {
            continue;
        };
        match book.submit(side, price, volume) {
            Ok(out) => {
                sent += 1;
                tracing::debug!(%side, %price, fills = out.trades.len(), "Taker order");
            }
            Err(err) => tracing::warn!(error = %err, "Taker order rejected"),
        }
    }
    sent
}

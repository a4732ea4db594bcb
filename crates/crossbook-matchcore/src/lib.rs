//! # crossbook-matchcore
//!
//! **Continuous matching core for one instrument.**
//!
//! - [`PriceQueue`]: comparator-driven binary heap per side, price then
//!   FIFO priority, O(log N) arbitrary removal
//! - [`OrderBook`]: submit / cancel / queries; every submission crosses
//!   the book to exhaustion before returning
//! - [`StatisticsTracker`]: last, high, low and cumulative volume
//! - [`SharedBook`]: lock-guarded handle with a broadcast trade stream
//!
//! ```text
//! submit(side, price, amount)
//!   -> PriceQueue::push -> crossing loop -> Vec<Trade> + stats update
//!   -> SubmitOutcome { order, trades }
//! ```

pub mod orderbook;
pub mod price_queue;
pub mod shared;
pub mod statistics;

pub use orderbook::{OrderBook, SubmitOutcome};
pub use price_queue::{PriceQueue, Priority, ask_priority, bid_priority};
pub use shared::SharedBook;
pub use statistics::StatisticsTracker;

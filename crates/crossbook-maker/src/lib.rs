//! # crossbook-maker
//!
//! Liquidity agent for a Crossbook book.
//!
//! - [`quote`]: two-sided quote around a reference mid with jitter
//! - [`MarketMaker`]: one quote pair per tick into a [`SharedBook`]
//! - [`MarketMakerHandle`]: adjust parameters or stop a running agent
//!
//! The agent holds no privileges over the book: it submits through the
//! same `SharedBook` API as any other caller.
//!
//! [`SharedBook`]: crossbook_matchcore::SharedBook

pub mod agent;
pub mod quote;

pub use agent::{MarketMaker, MarketMakerHandle, TickReport};
pub use quote::{Quote, quote};

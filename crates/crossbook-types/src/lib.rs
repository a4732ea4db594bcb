//! # crossbook-types
//!
//! Shared types, errors, and configuration for the **Crossbook** matching core.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`OrderId`], [`TradeId`], [`MarketPair`]
//! - **Order model**: [`Order`], [`OrderSide`], [`OrderStatus`]
//! - **Trade model**: [`Trade`]
//! - **Market data**: [`TradeStats`], [`MarketStats`], [`BookDepth`], [`DepthLevel`]
//! - **Configuration**: [`BookConfig`], [`ExecutionPricePolicy`], [`MarketMakerConfig`], [`SimConfig`]
//! - **Errors**: [`CrossbookError`] with `CB_ERR_` prefix codes
//! - **Constants**: limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod market_data;
pub mod order;
pub mod trade;

// Re-export all primary types at crate root:
//   use crossbook_types::{Order, OrderSide, Trade, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use market_data::*;
pub use order::*;
pub use trade::*;

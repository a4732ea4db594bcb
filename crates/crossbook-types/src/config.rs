//! Configuration types for books, the market maker and the simulator.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CrossbookError, MarketPair, Result, constants};

/// Which order's price a crossing executes at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPricePolicy {
    /// The order that was resting before the incoming submission.
    #[default]
    Resting,
    /// Always the ask's price, whichever side was the aggressor.
    Ask,
}

/// Configuration for a single book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub market: MarketPair,
    pub price_policy: ExecutionPricePolicy,
    /// How many completed/cancelled order statuses to remember.
    pub terminal_retention: usize,
    /// Per-subscriber buffer of the trade stream.
    pub trade_channel_capacity: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            market: MarketPair::default(),
            price_policy: ExecutionPricePolicy::default(),
            terminal_retention: constants::DEFAULT_TERMINAL_RETENTION,
            trade_channel_capacity: constants::DEFAULT_TRADE_CHANNEL_CAPACITY,
        }
    }
}

impl BookConfig {
    #[must_use]
    pub fn for_market(market: MarketPair) -> Self {
        Self {
            market,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.market.base.is_empty() || self.market.quote.is_empty() {
            return Err(CrossbookError::Configuration(
                "market base and quote must be non-empty".into(),
            ));
        }
        if self.trade_channel_capacity == 0 {
            return Err(CrossbookError::Configuration(
                "trade_channel_capacity must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Quoting parameters for the market maker.
///
/// These are the values `MarketMakerHandle::adjust` replaces at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMakerConfig {
    /// Quoted spread as a fraction of mid (0.002 = 0.2%).
    pub spread: Decimal,
    /// Target size of each quote.
    pub volume: Decimal,
    pub interval_ms: u64,
    /// Reference price when the book has no two-sided market.
    pub default_mid_price: Decimal,
    /// Max relative price jitter applied to each quote.
    pub price_jitter: Decimal,
    /// Max relative volume jitter applied to each quote pair.
    pub volume_jitter: Decimal,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            spread: Decimal::new(constants::DEFAULT_MM_SPREAD_BPS, 4),
            volume: Decimal::from(constants::DEFAULT_MM_VOLUME),
            interval_ms: constants::DEFAULT_MM_INTERVAL_MS,
            default_mid_price: Decimal::from(constants::DEFAULT_MM_MID_PRICE),
            price_jitter: Decimal::new(constants::DEFAULT_MM_PRICE_JITTER_BPS, 4),
            volume_jitter: Decimal::new(constants::DEFAULT_MM_VOLUME_JITTER_BPS, 4),
        }
    }
}

impl MarketMakerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.spread <= Decimal::ZERO || self.spread >= Decimal::TWO {
            return Err(CrossbookError::Configuration(format!(
                "spread must be in (0, 2), got {}",
                self.spread
            )));
        }
        if self.volume <= Decimal::ZERO || self.volume > Decimal::from(constants::MAX_AMOUNT) {
            return Err(CrossbookError::Configuration(format!(
                "volume must be in (0, {}], got {}",
                constants::MAX_AMOUNT,
                self.volume
            )));
        }
        if self.interval_ms == 0 {
            return Err(CrossbookError::Configuration(
                "interval_ms must be > 0".into(),
            ));
        }
        if self.default_mid_price <= Decimal::ZERO
            || self.default_mid_price > Decimal::from(constants::MAX_PRICE)
        {
            return Err(CrossbookError::Configuration(format!(
                "default_mid_price must be in (0, {}]",
                constants::MAX_PRICE
            )));
        }
        if self.price_jitter < Decimal::ZERO || self.price_jitter >= Decimal::ONE {
            return Err(CrossbookError::Configuration(
                "price_jitter must be in [0, 1)".into(),
            ));
        }
        if self.volume_jitter < Decimal::ZERO || self.volume_jitter >= Decimal::ONE {
            return Err(CrossbookError::Configuration(
                "volume_jitter must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration for the `crossbook-sim` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub book: BookConfig,
    pub maker: MarketMakerConfig,
    /// How long to run before stopping the maker.
    pub run_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            book: BookConfig::default(),
            maker: MarketMakerConfig::default(),
            run_ms: constants::DEFAULT_SIM_RUN_MS,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.book.validate()?;
        self.maker.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BookConfig::default().validate().is_ok());
        assert!(MarketMakerConfig::default().validate().is_ok());
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn default_policy_is_resting() {
        assert_eq!(
            BookConfig::default().price_policy,
            ExecutionPricePolicy::Resting
        );
    }

    #[test]
    fn maker_defaults_match_reference_bot() {
        let cfg = MarketMakerConfig::default();
        assert_eq!(cfg.spread, Decimal::new(2, 3));
        assert_eq!(cfg.price_jitter, Decimal::new(5, 4));
        assert_eq!(cfg.volume_jitter, Decimal::new(1, 1));
        assert_eq!(cfg.default_mid_price, Decimal::from(1000));
    }

    #[test]
    fn rejects_bad_maker_params() {
        let mut cfg = MarketMakerConfig {
            spread: Decimal::ZERO,
            ..MarketMakerConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CrossbookError::Configuration(_))
        ));

        cfg.spread = Decimal::new(1, 2);
        cfg.interval_ms = 0;
        assert!(cfg.validate().is_err());

        cfg.interval_ms = 10;
        cfg.volume = Decimal::NEGATIVE_ONE;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn maker_sizes_capped_at_order_limits() {
        let cfg = MarketMakerConfig {
            default_mid_price: Decimal::from(constants::MAX_PRICE) + Decimal::ONE,
            ..MarketMakerConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = MarketMakerConfig {
            volume: Decimal::from(constants::MAX_AMOUNT) + Decimal::ONE,
            ..MarketMakerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = SimConfig::from_json_str(
            r#"{ "book": { "price_policy": "ask" }, "maker": { "interval_ms": 50 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.book.price_policy, ExecutionPricePolicy::Ask);
        assert_eq!(cfg.maker.interval_ms, 50);
        assert_eq!(cfg.maker.volume, Decimal::ONE);
        assert_eq!(cfg.run_ms, constants::DEFAULT_SIM_RUN_MS);
    }

    #[test]
    fn invalid_json_is_serialization_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CrossbookError::Serialization(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CrossbookError::Io(_)));
    }
}

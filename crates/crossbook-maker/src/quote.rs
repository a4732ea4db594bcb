//! Quote computation for the market maker.
//!
//! Prices straddle a reference mid by half the configured spread on each
//! side, then get a small random jitter so consecutive quotes differ.

use crossbook_types::{MarketMakerConfig, constants};
use rand::Rng;
use rust_decimal::Decimal;

/// One two-sided quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub volume: Decimal,
}

/// Smallest representable price increment.
fn tick() -> Decimal {
    Decimal::new(1, constants::PRICE_PRECISION)
}

/// A factor in `[1 - max, 1 + max]`, in steps of `max / 1_000_000`.
fn jitter<R: Rng + ?Sized>(rng: &mut R, max: Decimal) -> Decimal {
    if max.is_zero() {
        return Decimal::ONE;
    }
    let step = rng.gen_range(-1_000_000i64..=1_000_000);
    Decimal::ONE + max * Decimal::new(step, 6)
}

/// Build a quote around `mid`, or around `params.default_mid_price` when
/// the caller has no reference price.
///
/// The result always satisfies `0 < bid_price < ask_price` and
/// `volume > 0`, rounded to book precision.
pub fn quote<R: Rng + ?Sized>(
    mid: Option<Decimal>,
    params: &MarketMakerConfig,
    rng: &mut R,
) -> Quote {
    let mid = mid
        .filter(|m| *m > Decimal::ZERO)
        .unwrap_or(params.default_mid_price);
    let half_spread = params.spread / Decimal::TWO;

    let mut bid_price = (mid * (Decimal::ONE - half_spread) * jitter(rng, params.price_jitter))
        .round_dp(constants::PRICE_PRECISION);
    let mut ask_price = (mid * (Decimal::ONE + half_spread) * jitter(rng, params.price_jitter))
        .round_dp(constants::PRICE_PRECISION);

    if bid_price <= Decimal::ZERO {
        bid_price = tick();
    }
    if ask_price <= bid_price {
        ask_price = bid_price + tick();
    }

    let mut volume = (params.volume * jitter(rng, params.volume_jitter))
        .round_dp(constants::AMOUNT_PRECISION);
    if volume <= Decimal::ZERO {
        volume = params.volume;
    }

    Quote {
        bid_price,
        ask_price,
        volume,
    }
}

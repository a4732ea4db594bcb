//! System-wide constants for the Crossbook matching core.

/// Maximum decimal places accepted on a price.
pub const PRICE_PRECISION: u32 = 8;

/// Maximum decimal places accepted on an amount.
pub const AMOUNT_PRECISION: u32 = 8;

/// Largest accepted price. With [`MAX_AMOUNT`] this keeps every notional
/// well inside `Decimal`'s range.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

/// Largest accepted amount.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Terminal order statuses remembered so cancels can report
/// "not cancellable" instead of "not found".
pub const DEFAULT_TERMINAL_RETENTION: usize = 100_000;

/// Buffered trades per subscriber before the slowest one starts lagging.
pub const DEFAULT_TRADE_CHANNEL_CAPACITY: usize = 1024;

/// Market maker: default quoted spread as a fraction of mid (0.2%).
pub const DEFAULT_MM_SPREAD_BPS: i64 = 20;

/// Market maker: default quote size.
pub const DEFAULT_MM_VOLUME: i64 = 1;

/// Market maker: default refresh interval in milliseconds.
pub const DEFAULT_MM_INTERVAL_MS: u64 = 1000;

/// Market maker: reference price used while the book is one-sided.
pub const DEFAULT_MM_MID_PRICE: i64 = 1000;

/// Market maker: price jitter, +/- this many basis points (0.05%).
pub const DEFAULT_MM_PRICE_JITTER_BPS: i64 = 5;

/// Market maker: volume jitter, +/- this many basis points (10%).
pub const DEFAULT_MM_VOLUME_JITTER_BPS: i64 = 1000;

/// Simulation: default wall-clock run time in milliseconds.
pub const DEFAULT_SIM_RUN_MS: u64 = 10_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Crossbook";

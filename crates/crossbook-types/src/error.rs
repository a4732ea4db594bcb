//! Error types for the Crossbook matching core.
//!
//! All errors use the `CB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Book / queue errors
//! - 9xx: General / internal errors
//!
//! An empty side of the book is not an error: queries return `None`.

use thiserror::Error;

use crate::{OrderId, OrderStatus};

/// Central error enum for all Crossbook operations.
#[derive(Debug, Error)]
pub enum CrossbookError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order was never seen by this book, or has aged out of retention.
    #[error("CB_ERR_100: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Non-positive or over-precise price or amount.
    #[error("CB_ERR_101: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// An order with this ID already rests in the queue.
    #[error("CB_ERR_102: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// The order is already completed or cancelled.
    #[error("CB_ERR_103: Order {id} cannot be cancelled: status is {status}")]
    OrderNotCancellable { id: OrderId, status: OrderStatus },

    // =================================================================
    // Book / Queue Errors (2xx)
    // =================================================================
    /// `pop_best` on an empty price queue.
    #[error("CB_ERR_200: Price queue is empty")]
    EmptyQueue,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("CB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("CB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad parameter, etc.).
    #[error("CB_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error.
    #[error("CB_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CrossbookError>;

impl From<std::io::Error> for CrossbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CrossbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

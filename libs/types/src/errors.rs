//! Error types for the exchange
//!
//! Error taxonomy using thiserror. Every error is recoverable by the caller.

use thiserror::Error;

use crate::ids::OrderId;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}

/// Raised when an instrument set, or a saved book, is rejected at load time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ambiguous symbols: '{first}' and '{second}'")]
    DuplicateSymbol { first: String, second: String },

    #[error("Ambiguous company names: '{first}' and '{second}'")]
    DuplicateCompanyName { first: String, second: String },

    #[error("Order {order_id} appears twice in the book of '{symbol}'")]
    DuplicateOrderId { symbol: String, order_id: OrderId },

    #[error("Order {order_id} in the book of '{symbol}' has no quantity")]
    EmptyOrder { symbol: String, order_id: OrderId },
}

/// Raised when querying the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No instruments have been loaded")]
    RegistryEmpty,

    #[error("No instrument with symbol '{symbol}'")]
    NoSuchSymbol { symbol: String },
}

/// Raised when an order request is rejected before reaching a book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid quantity: must be positive")]
    InvalidQuantity,

    #[error("Limit order requires a limit price")]
    MissingLimitPrice,

    #[error("Invalid price: must be positive")]
    InvalidPrice,
}

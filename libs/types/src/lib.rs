//! Types library for the stock exchange simulator
//!
//! Core type definitions shared by the matching engine and the persistence
//! layer: identifiers, integer prices and quantities, orders, transactions
//! and the error taxonomy.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, TransactionId)
//! - `numeric`: Integer price and quantity types
//! - `timestamp`: Unix-nanosecond timestamps and their display form
//! - `order`: Order types and the book priority order
//! - `trade`: Executed transaction records
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod timestamp;
pub mod order;
pub mod trade;
pub mod errors;

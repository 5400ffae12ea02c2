//! Matching logic module
//!
//! Implements price-time priority matching algorithm

pub mod crossing;
pub mod executor;
pub mod matcher;
pub mod pricing;

pub use crossing::incoming_can_match;
pub use executor::MatchExecutor;
pub use matcher::match_order;
pub use pricing::derive_market_price;

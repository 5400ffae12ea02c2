//! Matching Engine Service
//!
//! Continuous double auction over a registry of instruments, each with its
//! own order book, matching arriving orders under price-time priority.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Deterministic matching (same inputs → same outputs)
//! - Trades execute at the resting order's price
//! - Conservation of quantity
//! - No zero-quantity order is ever left resting

pub mod book;
pub mod config;
pub mod engine;
pub mod instrument;
pub mod matching;
pub mod registry;

pub use config::EngineConfig;
pub use engine::{MatchingEngine, SubmitResult};
pub use instrument::{Instrument, InstrumentSnapshot};
pub use registry::Registry;

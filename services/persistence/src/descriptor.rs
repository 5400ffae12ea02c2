//! Descriptor: the serializable form of the instrument universe
//!
//! A descriptor carries every instrument with its last traded price, its
//! resting orders (best first, per side) and its transaction history
//! (newest first). Order ids are not stored; they are handed out again in
//! file order when a descriptor is turned back into instruments.

use matching_engine::{Instrument, MatchingEngine};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use types::errors::{LookupError, ValidationError};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side};
use types::trade::Transaction;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File '{path}' must have a '.json' suffix")]
    InvalidSuffix { path: String },

    #[error("Malformed descriptor: {0}")]
    Malformed(String),

    #[error("Invalid instrument set: {0}")]
    Validation(#[from] ValidationError),

    #[error("Nothing to save: {0}")]
    Lookup(#[from] LookupError),
}

// ── Records ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub instruments: Vec<InstrumentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    pub symbol: String,
    pub company_name: String,
    pub price: Price,
    #[serde(default)]
    pub awaiting_buy: Vec<OrderRecord>,
    #[serde(default)]
    pub awaiting_sell: Vec<OrderRecord>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub timestamp: i64,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Quantity,
    pub limit_price: Price,
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            timestamp: order.timestamp,
            side: order.side,
            order_type: order.order_type,
            quantity: order.quantity,
            limit_price: order.limit_price,
        }
    }
}

impl From<&Instrument> for InstrumentRecord {
    fn from(instrument: &Instrument) -> Self {
        let book = instrument.book();
        Self {
            symbol: instrument.symbol().to_string(),
            company_name: instrument.company_name().to_string(),
            price: instrument.price(),
            awaiting_buy: book.awaiting_buy().map(OrderRecord::from).collect(),
            awaiting_sell: book.awaiting_sell().map(OrderRecord::from).collect(),
            transactions: book.transactions().cloned().collect(),
        }
    }
}

// ── Conversion ──────────────────────────────────────────────────────

impl Descriptor {
    /// Capture the engine's live instrument set
    ///
    /// Fails with `RegistryEmpty` when nothing has been loaded.
    pub fn from_engine(engine: &MatchingEngine) -> Result<Self, DescriptorError> {
        let instruments = engine
            .current_instruments()?
            .iter()
            .map(InstrumentRecord::from)
            .collect();
        Ok(Self { instruments })
    }

    /// Reject data the engine must never see
    ///
    /// Uniqueness of symbols and names is left to the registry.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        for record in &self.instruments {
            record.validate()?;
        }
        Ok(())
    }

    /// Validate and rebuild instruments, numbering orders from `first_order_id`
    pub fn into_instruments(self, first_order_id: u64) -> Result<Vec<Instrument>, DescriptorError> {
        self.validate()?;

        let mut next_id = OrderId::new(first_order_id);
        let instruments = self
            .instruments
            .into_iter()
            .map(|record| {
                let orders: Vec<Order> = record
                    .awaiting_buy
                    .iter()
                    .chain(record.awaiting_sell.iter())
                    .map(|o| {
                        let id = next_id;
                        next_id = id.next();
                        Order::new(id, o.timestamp, o.side, o.order_type, o.quantity, o.limit_price)
                    })
                    .collect();
                Instrument::restore(
                    record.symbol,
                    record.company_name,
                    record.price,
                    orders,
                    record.transactions,
                )
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        Ok(instruments)
    }
}

impl InstrumentRecord {
    fn validate(&self) -> Result<(), DescriptorError> {
        let malformed = |reason: String| Err(DescriptorError::Malformed(reason));

        if self.symbol.trim().is_empty() {
            return malformed("instrument with an empty symbol".to_string());
        }
        if self.company_name.trim().is_empty() {
            return malformed(format!("'{}' has an empty company name", self.symbol));
        }
        if self.price.is_zero() {
            return malformed(format!("'{}' has a zero price", self.symbol));
        }

        let sides = [(Side::BUY, &self.awaiting_buy), (Side::SELL, &self.awaiting_sell)];
        for (side, orders) in sides {
            for order in orders {
                if order.side != side {
                    return malformed(format!(
                        "'{}' lists a {} order among its {} orders",
                        self.symbol, order.side, side
                    ));
                }
                if order.quantity.is_zero() {
                    return malformed(format!("'{}' has a zero-quantity order", self.symbol));
                }
                if order.limit_price.is_zero() {
                    return malformed(format!("'{}' has a zero-price order", self.symbol));
                }
            }
        }

        for transaction in &self.transactions {
            if transaction.quantity.is_zero() {
                return malformed(format!("'{}' has a zero-quantity transaction", self.symbol));
            }
            if transaction.price.is_zero() {
                return malformed(format!("'{}' has a zero-price transaction", self.symbol));
            }
            // the engine must be able to number the next transaction
            if transaction.sequence == u64::MAX {
                return malformed(format!(
                    "'{}' has a transaction with sequence {}",
                    self.symbol,
                    u64::MAX
                ));
            }
        }
        Ok(())
    }
}

//! Executed transaction records
//!
//! A transaction copies everything it needs out of the two orders at the
//! moment of the match, so later changes to a surviving order never alter
//! history.

use crate::ids::{OrderId, TransactionId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use crate::timestamp::format_timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One executed match between an arriving order and a resting order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    /// Engine-wide monotonic sequence
    pub sequence: u64,
    /// Taken from the arriving order
    pub timestamp: i64,
    pub quantity: Quantity,
    /// Taken from the resting order
    pub price: Price,
    /// Side of the arriving order
    pub aggressor: Side,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
}

impl Transaction {
    pub fn new(
        sequence: u64,
        timestamp: i64,
        quantity: Quantity,
        price: Price,
        aggressor: Side,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
    ) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            sequence,
            timestamp,
            quantity,
            price,
            aggressor,
            maker_order_id,
            taker_order_id,
        }
    }

    /// Calculate transaction value (price × quantity)
    pub fn value(&self) -> u128 {
        self.price.value_of(self.quantity)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} @ {} value {}",
            format_timestamp(self.timestamp),
            self.quantity,
            self.price,
            self.value()
        )
    }
}

//! Order types
//!
//! An order is an intent to buy or sell a quantity of one instrument. Its
//! identity is its `OrderId`; two orders with identical fields are still two
//! distinct book entries.

use crate::errors::OrderError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::timestamp::format_timestamp;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "BUY"),
            Side::SELL => write!(f, "SELL"),
        }
    }
}

/// How the order's price is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Limit order: trades at its own price or better
    LMT,
    /// Market order: its price is derived from the opposite book
    /// (or the last traded price) and re-derived after each partial fill
    MKT,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::LMT => write!(f, "LMT"),
            OrderType::MKT => write!(f, "MKT"),
        }
    }
}

/// Order submission request, validated before an `Order` is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Quantity,
    /// Required for limit orders, ignored for market orders
    pub limit_price: Option<Price>,
}

impl OrderRequest {
    pub fn limit(side: Side, quantity: u64, price: u64) -> Self {
        Self {
            side,
            order_type: OrderType::LMT,
            quantity: Quantity::new(quantity),
            limit_price: Some(Price::new(price)),
        }
    }

    pub fn market(side: Side, quantity: u64) -> Self {
        Self {
            side,
            order_type: OrderType::MKT,
            quantity: Quantity::new(quantity),
            limit_price: None,
        }
    }

    /// Check quantity and price before the order reaches a book
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.quantity.is_zero() {
            return Err(OrderError::InvalidQuantity);
        }
        if self.order_type == OrderType::LMT {
            match self.limit_price {
                None => return Err(OrderError::MissingLimitPrice),
                Some(price) if price.is_zero() => return Err(OrderError::InvalidPrice),
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// An order resting in (or about to enter) a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Creation time, Unix nanos
    pub timestamp: i64,
    pub side: Side,
    pub order_type: OrderType,
    /// Remaining (unfilled) quantity
    pub quantity: Quantity,
    /// For market orders this is derived, not chosen by the submitter
    pub limit_price: Price,
}

impl Order {
    pub fn new(
        id: OrderId,
        timestamp: i64,
        side: Side,
        order_type: OrderType,
        quantity: Quantity,
        limit_price: Price,
    ) -> Self {
        Self {
            id,
            timestamp,
            side,
            order_type,
            quantity,
            limit_price,
        }
    }

    /// Book priority order
    ///
    /// Buy orders with a higher price come first, sell orders with a lower
    /// price come first. Orders of different sides compare equal on price.
    /// Equal prices fall back to the earlier timestamp, then to the lower id,
    /// so the result is a total order even when timestamps collide.
    pub fn priority_cmp(&self, other: &Order) -> Ordering {
        let by_price = match (self.side, other.side) {
            (Side::BUY, Side::BUY) => other.limit_price.cmp(&self.limit_price),
            (Side::SELL, Side::SELL) => self.limit_price.cmp(&other.limit_price),
            _ => Ordering::Equal,
        };
        by_price.then_with(|| self.time_priority_cmp(other))
    }

    /// Priority among orders at the same price: earlier timestamp, then lower id
    pub fn time_priority_cmp(&self, other: &Order) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.id.cmp(&other.id))
    }

    /// Total value of the remaining quantity at the limit price
    pub fn value(&self) -> u128 {
        self.limit_price.value_of(self.quantity)
    }

    pub fn is_market(&self) -> bool {
        self.order_type == OrderType::MKT
    }

    /// Reduce the remaining quantity by a fill and return what is left
    ///
    /// # Panics
    /// Panics if the fill exceeds the remaining quantity
    pub fn fill(&mut self, fill_quantity: Quantity) -> Quantity {
        self.quantity = self
            .quantity
            .checked_sub(fill_quantity)
            .expect("Fill would exceed order quantity");
        self.quantity
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} @ {} [{}] value {}",
            self.id,
            self.side,
            self.order_type,
            self.quantity,
            self.limit_price,
            format_timestamp(self.timestamp),
            self.value()
        )
    }
}

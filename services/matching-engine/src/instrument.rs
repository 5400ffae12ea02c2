//! Tradable instrument (stock)
//!
//! An instrument owns its order book. Its last-traded price is only ever
//! changed by recording a transaction.

use serde::Serialize;
use std::fmt;
use types::errors::ValidationError;
use types::numeric::Price;
use types::order::{Order, Side};
use types::trade::Transaction;

use crate::book::OrderBook;

#[derive(Debug, Clone)]
pub struct Instrument {
    symbol: String,
    company_name: String,
    /// Last traded price
    price: Price,
    book: OrderBook,
}

impl Instrument {
    /// Create an instrument with an empty book
    pub fn new(symbol: impl Into<String>, company_name: impl Into<String>, price: Price) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
            price,
            book: OrderBook::new(),
        }
    }

    /// Rebuild an instrument from saved state
    ///
    /// Orders are placed without matching, and `transactions` are taken as
    /// newest first. The saved price is kept as is. Every order needs a
    /// positive quantity and an id of its own.
    pub fn restore(
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        price: Price,
        orders: impl IntoIterator<Item = Order>,
        transactions: impl IntoIterator<Item = Transaction>,
    ) -> Result<Self, ValidationError> {
        let mut instrument = Self::new(symbol, company_name, price);
        for order in orders {
            if order.quantity.is_zero() {
                return Err(ValidationError::EmptyOrder {
                    symbol: instrument.symbol,
                    order_id: order.id,
                });
            }
            if instrument.book.get(&order.id).is_some() {
                return Err(ValidationError::DuplicateOrderId {
                    symbol: instrument.symbol,
                    order_id: order.id,
                });
            }
            instrument.book.insert(order);
        }
        for transaction in transactions {
            instrument.book.append_history(transaction);
        }
        Ok(instrument)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Last traded price (or the initial price if nothing has traded)
    pub fn price(&self) -> Price {
        self.price
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub(crate) fn book_mut(&mut self) -> &mut OrderBook {
        &mut self.book
    }

    /// Prepend a transaction to the history and take its price as the
    /// last traded price
    pub(crate) fn record_transaction(&mut self, transaction: Transaction) {
        self.price = transaction.price;
        self.book.push_transaction(transaction);
    }

    /// Point-in-time view for reporting
    pub fn snapshot(&self, depth: usize) -> InstrumentSnapshot {
        InstrumentSnapshot {
            symbol: self.symbol.clone(),
            company_name: self.company_name.clone(),
            price: self.price,
            bids: self.book.depth_snapshot(Side::BUY, depth),
            asks: self.book.depth_snapshot(Side::SELL, depth),
            transaction_count: self.book.transactions().len(),
            transactions_value: self.book.transactions_value(),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) price {} transactions {} [total value {}]",
            self.symbol,
            self.company_name,
            self.price,
            self.book.transactions().len(),
            self.book.transactions_value()
        )
    }
}

/// Order book snapshot for market data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentSnapshot {
    pub symbol: String,
    pub company_name: String,
    pub price: Price,
    /// Best levels first, as (price, aggregate quantity)
    pub bids: Vec<(Price, u128)>,
    pub asks: Vec<(Price, u128)>,
    pub transaction_count: usize,
    pub transactions_value: u128,
}

//! Order book for a single instrument
//!
//! Owns every resting order by id. The bid and ask books only index those
//! ids in priority order, so removing an order is a lookup by id and never
//! disturbs a scan of the other side.

use std::collections::{HashMap, VecDeque};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Transaction;

use super::{AskBook, BidBook};

/// Resting orders of both sides plus the executed transaction history
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: HashMap<OrderId, Order>,
    bids: BidBook,
    asks: AskBook,
    /// Newest first
    transactions: VecDeque<Transaction>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an order to its side of the book
    ///
    /// The order must have a positive quantity and an id not already resting.
    pub fn insert(&mut self, order: Order) {
        debug_assert!(!order.quantity.is_zero(), "zero-quantity order inserted");
        debug_assert!(!self.orders.contains_key(&order.id), "duplicate order id {}", order.id);
        match order.side {
            Side::BUY => self.bids.insert(&order),
            Side::SELL => self.asks.insert(&order),
        }
        self.orders.insert(order.id, order);
    }

    /// Remove an order from the book, returning it
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        let order = self.orders.remove(order_id)?;
        let removed = match order.side {
            Side::BUY => self.bids.remove(order_id, order.limit_price),
            Side::SELL => self.asks.remove(order_id, order.limit_price),
        };
        debug_assert!(removed, "order {} missing from its side index", order_id);
        Some(order)
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Whether the order is still resting on the given side
    pub fn contains(&self, side: Side, order_id: &OrderId) -> bool {
        match self.orders.get(order_id) {
            Some(order) if order.side == side => match side {
                Side::BUY => self.bids.contains(order_id, order.limit_price),
                Side::SELL => self.asks.contains(order_id, order.limit_price),
            },
            _ => false,
        }
    }

    /// The order with the highest priority on a side
    pub fn best(&self, side: Side) -> Option<&Order> {
        let id = match side {
            Side::BUY => self.bids.best_order_id(),
            Side::SELL => self.asks.best_order_id(),
        }?;
        self.orders.get(&id)
    }

    pub fn best_price(&self, side: Side) -> Option<Price> {
        match side {
            Side::BUY => self.bids.best_bid_price(),
            Side::SELL => self.asks.best_ask_price(),
        }
    }

    /// Take a fill off a resting order
    ///
    /// Returns the remaining quantity. An order that reaches zero is removed
    /// from the book in the same call.
    ///
    /// # Panics
    /// Panics if the fill exceeds the order's remaining quantity
    pub fn reduce(&mut self, order_id: &OrderId, fill: Quantity) -> Option<Quantity> {
        let order = self.orders.get_mut(order_id)?;
        let remaining = order.fill(fill);
        let (side, price) = (order.side, order.limit_price);

        if remaining.is_zero() {
            self.remove(order_id);
        } else {
            match side {
                Side::BUY => self.bids.update_quantity(order_id, price, remaining),
                Side::SELL => self.asks.update_quantity(order_id, price, remaining),
            };
        }
        Some(remaining)
    }

    /// Move a resting order to a new limit price, keeping its time priority
    pub fn reprice(&mut self, order_id: &OrderId, new_price: Price) -> bool {
        let Some(mut order) = self.remove(order_id) else {
            return false;
        };
        order.limit_price = new_price;
        self.insert(order);
        true
    }

    /// Resting buy orders, best first
    pub fn awaiting_buy(&self) -> impl Iterator<Item = &Order> + '_ {
        self.bids.order_ids().filter_map(move |id| self.orders.get(&id))
    }

    /// Resting sell orders, best first
    pub fn awaiting_sell(&self) -> impl Iterator<Item = &Order> + '_ {
        self.asks.order_ids().filter_map(move |id| self.orders.get(&id))
    }

    /// Resting orders of one side, best first
    pub fn awaiting(&self, side: Side) -> Vec<&Order> {
        match side {
            Side::BUY => self.awaiting_buy().collect(),
            Side::SELL => self.awaiting_sell().collect(),
        }
    }

    /// Executed transactions, newest first
    pub fn transactions(&self) -> impl ExactSizeIterator<Item = &Transaction> + '_ {
        self.transactions.iter()
    }

    pub(crate) fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push_front(transaction);
    }

    /// Append history in oldest-last order (used when restoring a saved book)
    pub(crate) fn append_history(&mut self, transaction: Transaction) {
        self.transactions.push_back(transaction);
    }

    pub fn order_count(&self, side: Side) -> usize {
        match side {
            Side::BUY => self.bids.order_count(),
            Side::SELL => self.asks.order_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of remaining quantity on a side
    pub fn resting_quantity(&self, side: Side) -> u128 {
        match side {
            Side::BUY => self.bids.total_quantity(),
            Side::SELL => self.asks.total_quantity(),
        }
    }

    /// Total value (price × quantity) of the resting orders on a side
    pub fn total_value(&self, side: Side) -> u128 {
        match side {
            Side::BUY => self.bids.total_value(),
            Side::SELL => self.asks.total_value(),
        }
    }

    /// Total value of all executed transactions
    pub fn transactions_value(&self) -> u128 {
        self.transactions
            .iter()
            .map(Transaction::value)
            .fold(0, u128::saturating_add)
    }

    /// Aggregated quantity of the top `depth` price levels of a side
    pub fn depth_snapshot(&self, side: Side, depth: usize) -> Vec<(Price, u128)> {
        match side {
            Side::BUY => self.bids.depth_snapshot(depth),
            Side::SELL => self.asks.depth_snapshot(depth),
        }
    }

    /// Highest order id resting in the book
    pub fn max_order_id(&self) -> Option<OrderId> {
        self.orders.keys().max().copied()
    }
}

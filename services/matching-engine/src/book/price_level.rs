//! Price level: the resting orders at one price point
//!
//! Entries are kept in time priority: earlier timestamp first, then lower
//! order id. Insertion is positional rather than push-back because restored
//! or back-dated orders may arrive out of timestamp order.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::Quantity;
use types::order::Order;

/// A price level containing orders at a specific price
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Orders at this price level in time priority
    orders: VecDeque<LevelEntry>,
    /// Total quantity available at this level, wide enough that it never overflows
    total_quantity: u128,
}

/// Entry in the price level queue
#[derive(Debug, Clone)]
struct LevelEntry {
    order_id: OrderId,
    timestamp: i64,
    remaining_quantity: Quantity,
}

impl LevelEntry {
    fn priority(&self) -> (i64, OrderId) {
        (self.timestamp, self.order_id)
    }
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: 0,
        }
    }

    /// Insert an order at its time-priority position
    pub fn insert(&mut self, order: &Order) {
        let entry = LevelEntry {
            order_id: order.id,
            timestamp: order.timestamp,
            remaining_quantity: order.quantity,
        };
        let key = entry.priority();
        let position = self.orders.partition_point(|e| e.priority() < key);
        self.orders.insert(position, entry);
        self.total_quantity += u128::from(order.quantity.get());
    }

    /// Remove an order from the queue by OrderId
    ///
    /// Returns the remaining quantity of the removed order, or None if not found
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Quantity> {
        let position = self.position(order_id)?;
        let entry = self.orders.remove(position)?;
        self.total_quantity -= u128::from(entry.remaining_quantity.get());
        Some(entry.remaining_quantity)
    }

    /// Update the remaining quantity of an order at this level
    ///
    /// Returns false if the order is not at this level.
    pub fn update_quantity(&mut self, order_id: &OrderId, new_quantity: Quantity) -> bool {
        let Some(position) = self.position(order_id) else {
            return false;
        };
        let entry = &mut self.orders[position];
        let old_quantity = entry.remaining_quantity;
        entry.remaining_quantity = new_quantity;
        self.total_quantity = self.total_quantity - u128::from(old_quantity.get()) + u128::from(new_quantity.get());
        true
    }

    /// Id of the order with the highest time priority
    pub fn front(&self) -> Option<OrderId> {
        self.orders.front().map(|entry| entry.order_id)
    }

    /// Order ids in time priority
    pub fn order_ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.orders.iter().map(|entry| entry.order_id)
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.position(order_id).is_some()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> u128 {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    fn position(&self, order_id: &OrderId) -> Option<usize> {
        self.orders.iter().position(|entry| &entry.order_id == order_id)
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}

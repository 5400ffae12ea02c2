//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are kept in time priority.
#[derive(Debug, Clone)]
pub struct AskBook {
    /// Price levels sorted ascending (lowest price first)
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order into the ask book
    pub fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.limit_price).or_default();
        level.insert(order);
    }

    /// Remove an order from the ask book
    ///
    /// Returns true if the order was found and removed
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> bool {
        if let Some(level) = self.levels.get_mut(&price) {
            if level.remove(order_id).is_some() {
                // Remove empty price levels to keep book clean
                if level.is_empty() {
                    self.levels.remove(&price);
                }
                return true;
            }
        }
        false
    }

    /// Record a new remaining quantity for a resting order
    pub fn update_quantity(&mut self, order_id: &OrderId, price: Price, quantity: Quantity) -> bool {
        self.levels
            .get_mut(&price)
            .is_some_and(|level| level.update_quantity(order_id, quantity))
    }

    pub fn contains(&self, order_id: &OrderId, price: Price) -> bool {
        self.levels
            .get(&price)
            .is_some_and(|level| level.contains(order_id))
    }

    /// Get the best ask price
    pub fn best_ask_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Id of the order at the top of the book
    pub fn best_order_id(&self) -> Option<OrderId> {
        self.levels.values().next().and_then(PriceLevel::front)
    }

    /// All resting order ids, best first
    pub fn order_ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.levels.values().flat_map(|level| level.order_ids())
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, u128)> {
        self.levels
            .iter()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }

    /// Resting quantity across all levels
    pub fn total_quantity(&self) -> u128 {
        self.levels.values().map(PriceLevel::total_quantity).sum()
    }

    /// Value (price × quantity) of everything resting, saturating at `u128::MAX`
    pub fn total_value(&self) -> u128 {
        self.levels
            .iter()
            .map(|(price, level)| u128::from(price.get()).saturating_mul(level.total_quantity()))
            .fold(0, u128::saturating_add)
    }
}

impl Default for AskBook {
    fn default() -> Self {
        Self::new()
    }
}

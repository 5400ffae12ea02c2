//! Trade execution logic
//!
//! Builds transaction records and hands out their sequence numbers

use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Transaction;

/// Match executor for handling transaction generation
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    sequence_counter: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter = seq.saturating_add(1);
        seq
    }

    /// Sequence the next transaction will receive
    pub fn peek_sequence(&self) -> u64 {
        self.sequence_counter
    }

    /// Never hand out a sequence at or below `sequence`
    pub fn advance_past(&mut self, sequence: u64) {
        self.sequence_counter = self.sequence_counter.max(sequence.saturating_add(1));
    }

    /// Execute a trade between a resting (maker) and an arriving (taker) order
    ///
    /// `timestamp` is the arriving order's; `price` is the resting order's.
    pub fn execute_trade(
        &mut self,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        aggressor: Side,
        price: Price,
        quantity: Quantity,
        timestamp: i64,
    ) -> Transaction {
        debug_assert!(!quantity.is_zero(), "zero-quantity transaction");
        let sequence = self.next_sequence();
        Transaction::new(
            sequence,
            timestamp,
            quantity,
            price,
            aggressor,
            maker_order_id,
            taker_order_id,
        )
    }
}

impl Default for MatchExecutor {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_trade() {
        let mut executor = MatchExecutor::new(1000);

        let trade = executor.execute_trade(
            OrderId::new(1),
            OrderId::new(2),
            Side::BUY,
            Price::new(50),
            Quantity::new(100),
            1708123456789000000,
        );

        assert_eq!(trade.sequence, 1000);
        assert_eq!(trade.price, Price::new(50));
        assert_eq!(trade.quantity, Quantity::new(100));
        assert_eq!(trade.maker_order_id, OrderId::new(1));
        assert_eq!(trade.taker_order_id, OrderId::new(2));
        assert_eq!(trade.timestamp, 1708123456789000000);
    }

    #[test]
    fn test_sequence_monotonic() {
        let mut executor = MatchExecutor::new(1000);

        let trade1 = executor.execute_trade(OrderId::new(1), OrderId::new(3), Side::SELL, Price::new(50), Quantity::new(5), 1);
        let trade2 = executor.execute_trade(OrderId::new(2), OrderId::new(3), Side::SELL, Price::new(49), Quantity::new(3), 1);

        assert_eq!(trade1.sequence, 1000);
        assert_eq!(trade2.sequence, 1001);
        assert_eq!(executor.peek_sequence(), 1002);
    }

    #[test]
    fn test_advance_past() {
        let mut executor = MatchExecutor::new(5);
        executor.advance_past(41);
        assert_eq!(executor.peek_sequence(), 42);
        // never moves backwards
        executor.advance_past(3);
        assert_eq!(executor.peek_sequence(), 42);
    }

    #[test]
    fn test_advance_past_end_of_sequence_space() {
        let mut executor = MatchExecutor::new(1);
        executor.advance_past(u64::MAX);
        assert_eq!(executor.peek_sequence(), u64::MAX);

        let trade = executor.execute_trade(OrderId::new(1), OrderId::new(2), Side::BUY, Price::new(5), Quantity::new(1), 1);
        assert_eq!(trade.sequence, u64::MAX);
    }
}

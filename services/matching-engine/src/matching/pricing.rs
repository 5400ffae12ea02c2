//! Market-order price discovery

use types::numeric::Price;
use types::order::Side;

use crate::book::OrderBook;

/// Reference price for a market order on `side`
///
/// A market buy takes the best resting sell price, a market sell the best
/// resting buy price. With nothing on the opposite side the instrument's
/// last traded price is used.
pub fn derive_market_price(book: &OrderBook, last_price: Price, side: Side) -> Price {
    book.best_price(side.opposite()).unwrap_or(last_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::numeric::Quantity;
    use types::order::{Order, OrderType};

    fn limit(id: u64, side: Side, price: u64) -> Order {
        Order::new(OrderId::new(id), id as i64, side, OrderType::LMT, Quantity::new(10), Price::new(price))
    }

    #[test]
    fn test_buy_uses_best_sell() {
        let mut book = OrderBook::new();
        book.insert(limit(1, Side::SELL, 52));
        book.insert(limit(2, Side::SELL, 50));
        book.insert(limit(3, Side::BUY, 70));

        assert_eq!(derive_market_price(&book, Price::new(40), Side::BUY), Price::new(50));
    }

    #[test]
    fn test_sell_uses_best_buy() {
        let mut book = OrderBook::new();
        book.insert(limit(1, Side::BUY, 30));
        book.insert(limit(2, Side::BUY, 33));

        assert_eq!(derive_market_price(&book, Price::new(40), Side::SELL), Price::new(33));
    }

    #[test]
    fn test_empty_opposite_uses_last_price() {
        let mut book = OrderBook::new();
        book.insert(limit(1, Side::BUY, 30));

        assert_eq!(derive_market_price(&book, Price::new(40), Side::BUY), Price::new(40));
    }
}

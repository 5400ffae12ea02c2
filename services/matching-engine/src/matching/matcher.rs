//! Continuous matching of one arriving order against the opposite side
//!
//! The arriving order is already resting on its own side when matching
//! starts. Each step trades against the best opposite order while the two
//! prices cross, at the resting order's price.

use tracing::{debug, warn};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Transaction;

use crate::book::OrderBook;
use crate::instrument::Instrument;

use super::crossing::incoming_can_match;
use super::executor::MatchExecutor;
use super::pricing::derive_market_price;

/// Match a newly arrived order against the opposite side of its book
///
/// Returns the transactions created, oldest first. Resting orders that fill
/// completely are removed, partial fills stay with their reduced quantity,
/// and a market order left with a remainder is re-priced from the book.
///
/// The arriving order must be resting on its own side. Calling this for an
/// order that is not in the book is a contract violation: it panics in debug
/// builds and returns no transactions in release builds.
pub fn match_order(
    instrument: &mut Instrument,
    arrived_id: OrderId,
    executor: &mut MatchExecutor,
) -> Vec<Transaction> {
    let Some(arrived) = instrument.book().get(&arrived_id) else {
        debug_assert!(false, "order {arrived_id} is not resting in {}", instrument.symbol());
        warn!(symbol = instrument.symbol(), order_id = %arrived_id, "Match requested for unknown order");
        return Vec::new();
    };
    let side = arrived.side;
    let timestamp = arrived.timestamp;
    let is_market = arrived.is_market();

    let mut transactions = Vec::new();

    loop {
        // A previous step may have filled the arriving order completely
        let Some((arrived_quantity, arrived_price)) = resting_terms(instrument.book(), side, &arrived_id) else {
            break;
        };
        let Some((maker_id, maker_quantity, maker_price)) = instrument
            .book()
            .best(side.opposite())
            .map(|order| (order.id, order.quantity, order.limit_price))
        else {
            break;
        };

        // Book order is total, so nothing behind a non-crossing best crosses either
        if !incoming_can_match(side, arrived_price, maker_price) {
            break;
        }

        let trade_quantity = arrived_quantity.min(maker_quantity);
        let transaction =
            executor.execute_trade(maker_id, arrived_id, side, maker_price, trade_quantity, timestamp);
        debug!(
            symbol = instrument.symbol(),
            sequence = transaction.sequence,
            maker = %maker_id,
            taker = %arrived_id,
            quantity = trade_quantity.get(),
            price = maker_price.get(),
            "Transaction executed"
        );
        let book = instrument.book_mut();
        book.reduce(&maker_id, trade_quantity);
        let remaining = book
            .reduce(&arrived_id, trade_quantity)
            .unwrap_or(Quantity::ZERO);

        instrument.record_transaction(transaction.clone());

        if !remaining.is_zero() && is_market {
            let reference = derive_market_price(instrument.book(), instrument.price(), side);
            instrument.book_mut().reprice(&arrived_id, reference);
        }

        transactions.push(transaction);
    }

    transactions
}

/// Quantity and price of an order if it is still resting on `side`
fn resting_terms(book: &OrderBook, side: Side, order_id: &OrderId) -> Option<(Quantity, Price)> {
    if !book.contains(side, order_id) {
        return None;
    }
    book.get(order_id).map(|order| (order.quantity, order.limit_price))
}

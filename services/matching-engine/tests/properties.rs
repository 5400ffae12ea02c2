//! Property tests over random order flow

use std::collections::HashMap;

use matching_engine::{Instrument, MatchingEngine};
use proptest::prelude::*;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderRequest, Side};

const SYMBOL: &str = "PROP";

fn arb_request() -> impl Strategy<Value = OrderRequest> {
    let side = prop_oneof![Just(Side::BUY), Just(Side::SELL)];
    (side, 1u64..200, 90u64..110, any::<bool>()).prop_map(|(side, qty, price, market)| {
        if market {
            OrderRequest::market(side, qty)
        } else {
            OrderRequest::limit(side, qty, price)
        }
    })
}

fn fresh_engine() -> MatchingEngine {
    let mut engine = MatchingEngine::default();
    engine
        .load_instruments(vec![Instrument::new(SYMBOL, "Property Test Inc", Price::new(100))])
        .unwrap();
    engine
}

fn resting_total(engine: &MatchingEngine) -> u128 {
    let book = engine.lookup(SYMBOL).unwrap().book();
    book.resting_quantity(Side::BUY) + book.resting_quantity(Side::SELL)
}

fn is_priority_sorted(orders: &[&Order]) -> bool {
    orders
        .windows(2)
        .all(|pair| pair[0].priority_cmp(pair[1]) == std::cmp::Ordering::Less)
}

proptest! {
    #[test]
    fn prop_quantity_is_conserved(requests in prop::collection::vec(arb_request(), 1..60)) {
        let mut engine = fresh_engine();
        let mut submitted = 0u128;
        let mut traded = 0u128;

        for (i, request) in requests.into_iter().enumerate() {
            let before = resting_total(&engine);
            let result = engine.submit_order(SYMBOL, request, i as i64).unwrap();
            let filled: u128 = result.transactions().iter().map(|t| u128::from(t.quantity.get())).sum();

            submitted += u128::from(request.quantity.get());
            traded += filled;

            // each unit traded leaves both sides once
            prop_assert_eq!(resting_total(&engine), before + u128::from(request.quantity.get()) - 2 * filled);
        }
        prop_assert_eq!(resting_total(&engine) + 2 * traded, submitted);
    }

    #[test]
    fn prop_no_overfill_and_sorted_books(requests in prop::collection::vec(arb_request(), 1..60)) {
        let mut engine = fresh_engine();
        let mut original: HashMap<OrderId, Quantity> = HashMap::new();

        for (i, request) in requests.into_iter().enumerate() {
            let result = engine.submit_order(SYMBOL, request, i as i64).unwrap();
            original.insert(result.order_id(), request.quantity);

            let book = engine.lookup(SYMBOL).unwrap().book();
            let buys: Vec<&Order> = book.awaiting_buy().collect();
            let sells: Vec<&Order> = book.awaiting_sell().collect();

            for order in buys.iter().chain(sells.iter()) {
                prop_assert!(!order.quantity.is_zero());
                prop_assert!(order.quantity <= original[&order.id]);
            }
            prop_assert!(is_priority_sorted(&buys));
            prop_assert!(is_priority_sorted(&sells));
        }
    }

    #[test]
    fn prop_trades_execute_at_resting_price(requests in prop::collection::vec(arb_request(), 1..60)) {
        let mut engine = fresh_engine();

        for (i, request) in requests.into_iter().enumerate() {
            let resting_prices: HashMap<OrderId, Price> = engine
                .lookup(SYMBOL)
                .unwrap()
                .book()
                .awaiting(request.side.opposite())
                .into_iter()
                .map(|o| (o.id, o.limit_price))
                .collect();

            let result = engine.submit_order(SYMBOL, request, i as i64).unwrap();

            for transaction in result.transactions() {
                prop_assert_eq!(Some(&transaction.price), resting_prices.get(&transaction.maker_order_id));
                prop_assert_eq!(transaction.taker_order_id, result.order_id());
            }
            if let Some(last) = result.transactions().last() {
                prop_assert_eq!(engine.lookup(SYMBOL).unwrap().price(), last.price);
            }
        }
    }
}

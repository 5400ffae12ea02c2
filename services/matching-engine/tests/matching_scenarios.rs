//! End-to-end matching scenarios through the public engine API

use matching_engine::{EngineConfig, Instrument, MatchingEngine, SubmitResult};
use types::errors::{LookupError, ValidationError};
use types::numeric::{Price, Quantity};
use types::order::{OrderRequest, OrderType, Side};

const TS: i64 = 1708123456789000000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn engine() -> MatchingEngine {
    init_tracing();
    let mut engine = MatchingEngine::new(EngineConfig::default());
    engine
        .load_instruments(vec![
            Instrument::new("INTC", "Intel", Price::new(48)),
            Instrument::new("AMD", "Advanced Micro Devices", Price::new(120)),
        ])
        .unwrap();
    engine
}

fn terms(result: &SubmitResult) -> Vec<(u64, u64)> {
    result
        .transactions()
        .iter()
        .map(|t| (t.quantity.get(), t.price.get()))
        .collect()
}

#[test]
fn market_buy_sweeps_two_price_levels() {
    let mut engine = engine();
    engine.submit_order("INTC", OrderRequest::limit(Side::SELL, 100, 50), TS).unwrap();
    engine.submit_order("INTC", OrderRequest::limit(Side::SELL, 200, 52), TS + 1).unwrap();

    let result = engine
        .submit_order("INTC", OrderRequest::market(Side::BUY, 150), TS + 2)
        .unwrap();

    assert!(matches!(result, SubmitResult::Filled { .. }));
    assert_eq!(terms(&result), vec![(100, 50), (50, 52)]);

    let intc = engine.lookup("INTC").unwrap();
    assert_eq!(intc.price(), Price::new(52));
    let sells: Vec<(u64, u64)> = intc
        .book()
        .awaiting_sell()
        .map(|o| (o.quantity.get(), o.limit_price.get()))
        .collect();
    assert_eq!(sells, vec![(150, 52)]);
    assert_eq!(intc.book().awaiting_buy().count(), 0);

    // history is newest first
    let history: Vec<(u64, u64)> = intc
        .book()
        .transactions()
        .map(|t| (t.quantity.get(), t.price.get()))
        .collect();
    assert_eq!(history, vec![(50, 52), (100, 50)]);
    assert!(intc.book().transactions().all(|t| t.timestamp == TS + 2));
}

#[test]
fn market_buy_on_empty_sell_side_rests_at_last_price() {
    let mut engine = engine();

    let result = engine
        .submit_order("INTC", OrderRequest::market(Side::BUY, 10), TS)
        .unwrap();

    assert!(matches!(result, SubmitResult::Resting { .. }));
    let intc = engine.lookup("INTC").unwrap();
    let resting = intc.book().get(&result.order_id()).unwrap();
    assert_eq!(resting.order_type, OrderType::MKT);
    assert_eq!(resting.limit_price, Price::new(48));
    assert_eq!(resting.quantity, Quantity::new(10));
}

#[test]
fn non_crossing_limit_orders_both_rest() {
    let mut engine = engine();
    engine.submit_order("INTC", OrderRequest::limit(Side::SELL, 100, 35), TS).unwrap();

    let result = engine
        .submit_order("INTC", OrderRequest::limit(Side::BUY, 100, 30), TS + 1)
        .unwrap();

    assert!(result.transactions().is_empty());
    let book = engine.lookup("INTC").unwrap().book();
    assert_eq!(book.awaiting_buy().map(|o| o.quantity.get()).collect::<Vec<_>>(), vec![100]);
    assert_eq!(book.awaiting_sell().map(|o| o.quantity.get()).collect::<Vec<_>>(), vec![100]);
    assert_eq!(book.transactions().len(), 0);
}

#[test]
fn sell_limit_fills_best_bids_first() {
    let mut engine = engine();
    engine.submit_order("AMD", OrderRequest::limit(Side::BUY, 10, 118), TS).unwrap();
    engine.submit_order("AMD", OrderRequest::limit(Side::BUY, 10, 121), TS + 1).unwrap();
    engine.submit_order("AMD", OrderRequest::limit(Side::BUY, 10, 121), TS + 2).unwrap();

    let result = engine
        .submit_order("AMD", OrderRequest::limit(Side::SELL, 25, 119), TS + 3)
        .unwrap();

    assert_eq!(terms(&result), vec![(10, 121), (10, 121)]);
    match result {
        SubmitResult::PartiallyFilled { remaining, .. } => {
            assert_eq!(remaining.quantity, Quantity::new(5));
            assert_eq!(remaining.limit_price, Price::new(119));
        }
        other => panic!("Expected PartiallyFilled, got {other:?}"),
    }
    let amd = engine.lookup("AMD").unwrap();
    assert_eq!(amd.price(), Price::new(121));
    assert_eq!(amd.book().best_price(Side::BUY), Some(Price::new(118)));
}

#[test]
fn instruments_are_matched_independently() {
    let mut engine = engine();
    engine.submit_order("INTC", OrderRequest::limit(Side::SELL, 10, 50), TS).unwrap();

    let result = engine
        .submit_order("AMD", OrderRequest::limit(Side::BUY, 10, 500), TS + 1)
        .unwrap();

    assert!(result.transactions().is_empty());
    assert_eq!(engine.lookup("INTC").unwrap().price(), Price::new(48));
}

#[test]
fn resting_market_order_is_hit_at_its_derived_price() {
    let mut engine = engine();
    let market = engine
        .submit_order("INTC", OrderRequest::market(Side::BUY, 10), TS)
        .unwrap();

    let result = engine
        .submit_order("INTC", OrderRequest::limit(Side::SELL, 4, 45), TS + 1)
        .unwrap();

    assert_eq!(terms(&result), vec![(4, 48)]);
    assert_eq!(result.transactions()[0].maker_order_id, market.order_id());
}

#[test]
fn duplicate_symbols_are_rejected_at_load() {
    let mut engine = MatchingEngine::default();
    let err = engine
        .load_instruments(vec![
            Instrument::new("ABC", "Alpha", Price::new(1)),
            Instrument::new("abc", "Beta", Price::new(1)),
        ])
        .unwrap_err();

    assert!(matches!(err, ValidationError::DuplicateSymbol { .. }));
    assert_eq!(engine.current_instruments().unwrap_err(), LookupError::RegistryEmpty);
}

#[test]
fn unique_instruments_load() {
    let engine = engine();
    let symbols: Vec<&str> = engine
        .current_instruments()
        .unwrap()
        .iter()
        .map(Instrument::symbol)
        .collect();
    assert_eq!(symbols, vec!["INTC", "AMD"]);
}

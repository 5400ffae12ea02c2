//! Matching engine core
//!
//! Main coordinator for the instrument registry and matching logic

use tracing::{debug, info};
use types::errors::{EngineError, LookupError, OrderError, ValidationError};
use types::ids::OrderId;
use types::order::{Order, OrderRequest, OrderType};
use types::timestamp::now_nanos;
use types::trade::Transaction;

use crate::config::EngineConfig;
use crate::instrument::{Instrument, InstrumentSnapshot};
use crate::matching::{derive_market_price, match_order, MatchExecutor};
use crate::registry::Registry;

/// Main matching engine
pub struct MatchingEngine {
    /// Instrument universe, each with its own book
    registry: Registry,
    /// Transaction executor with sequence generation
    executor: MatchExecutor,
    /// Id for the next accepted order
    next_order_id: OrderId,
    config: EngineConfig,
}

/// Result of submitting an order
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// Order was added to book (no match)
    Resting { order_id: OrderId },
    /// Order was partially filled and its remainder rests in the book
    PartiallyFilled {
        order_id: OrderId,
        transactions: Vec<Transaction>,
        remaining: Order,
    },
    /// Order was completely filled
    Filled {
        order_id: OrderId,
        transactions: Vec<Transaction>,
    },
}

impl SubmitResult {
    pub fn order_id(&self) -> OrderId {
        match self {
            SubmitResult::Resting { order_id }
            | SubmitResult::PartiallyFilled { order_id, .. }
            | SubmitResult::Filled { order_id, .. } => *order_id,
        }
    }

    /// Transactions created by this submission, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        match self {
            SubmitResult::Resting { .. } => &[],
            SubmitResult::PartiallyFilled { transactions, .. }
            | SubmitResult::Filled { transactions, .. } => transactions,
        }
    }
}

impl MatchingEngine {
    /// Create a new matching engine with no instruments loaded
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(Registry::new(), config)
    }

    /// Create a matching engine over an existing registry
    pub fn with_registry(registry: Registry, config: EngineConfig) -> Self {
        let mut engine = Self {
            registry,
            executor: MatchExecutor::new(config.first_transaction_sequence),
            next_order_id: OrderId::new(config.first_order_id),
            config,
        };
        engine.sync_sequences();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate and install a complete instrument set
    pub fn load_instruments(&mut self, instruments: Vec<Instrument>) -> Result<(), ValidationError> {
        self.registry.load(instruments)?;
        self.sync_sequences();
        Ok(())
    }

    /// The live instrument set, or `RegistryEmpty` if nothing is loaded
    pub fn current_instruments(&self) -> Result<&[Instrument], LookupError> {
        self.registry.instruments()
    }

    /// Find an instrument by symbol, ignoring case
    pub fn lookup(&self, symbol: &str) -> Result<&Instrument, LookupError> {
        self.registry.lookup(symbol)
    }

    /// Submit an order to the matching engine
    ///
    /// The order is placed on its own side of the instrument's book and then
    /// matched against the opposite side. A market order is priced from the
    /// book before it is placed.
    pub fn submit_order(
        &mut self,
        symbol: &str,
        request: OrderRequest,
        timestamp: i64,
    ) -> Result<SubmitResult, EngineError> {
        request.validate()?;

        let instrument = self.registry.lookup_mut(symbol)?;
        let limit_price = match request.order_type {
            OrderType::LMT => request.limit_price.ok_or(OrderError::MissingLimitPrice)?,
            OrderType::MKT => derive_market_price(instrument.book(), instrument.price(), request.side),
        };

        let order_id = self.next_order_id;
        self.next_order_id = order_id.next();

        let order = Order::new(
            order_id,
            timestamp,
            request.side,
            request.order_type,
            request.quantity,
            limit_price,
        );
        debug!(symbol = instrument.symbol(), order = %order, "Order accepted");
        instrument.book_mut().insert(order);

        let transactions = match_order(instrument, order_id, &mut self.executor);

        let result = match instrument.book().get(&order_id) {
            None => SubmitResult::Filled {
                order_id,
                transactions,
            },
            Some(_) if transactions.is_empty() => SubmitResult::Resting { order_id },
            Some(remaining) => SubmitResult::PartiallyFilled {
                order_id,
                transactions,
                remaining: remaining.clone(),
            },
        };

        if !result.transactions().is_empty() {
            info!(
                symbol = instrument.symbol(),
                order_id = %order_id,
                transactions = result.transactions().len(),
                price = instrument.price().get(),
                "Order matched"
            );
        }
        Ok(result)
    }

    /// Submit an order stamped with the current wall-clock time
    pub fn submit_order_now(&mut self, symbol: &str, request: OrderRequest) -> Result<SubmitResult, EngineError> {
        self.submit_order(symbol, request, now_nanos())
    }

    /// Reporting view of one instrument
    pub fn snapshot(&self, symbol: &str) -> Result<InstrumentSnapshot, LookupError> {
        Ok(self.registry.lookup(symbol)?.snapshot(self.config.snapshot_depth))
    }

    /// Reporting view of every instrument, in load order
    pub fn snapshots(&self) -> Result<Vec<InstrumentSnapshot>, LookupError> {
        Ok(self
            .registry
            .instruments()?
            .iter()
            .map(|instrument| instrument.snapshot(self.config.snapshot_depth))
            .collect())
    }

    /// Keep order ids and transaction sequences ahead of anything restored
    fn sync_sequences(&mut self) {
        let Ok(instruments) = self.registry.instruments() else {
            return;
        };
        let max_order = instruments
            .iter()
            .filter_map(|instrument| instrument.book().max_order_id())
            .max();
        let max_sequence = instruments
            .iter()
            .flat_map(|instrument| instrument.book().transactions())
            .map(|transaction| transaction.sequence)
            .max();

        if let Some(max_order) = max_order {
            if max_order >= self.next_order_id {
                self.next_order_id = max_order.next();
            }
        }
        if let Some(max_sequence) = max_sequence {
            self.executor.advance_past(max_sequence);
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

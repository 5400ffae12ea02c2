//! Engine configuration

/// Configuration for the matching engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Sequence given to the first accepted order
    pub first_order_id: u64,
    /// Sequence given to the first executed transaction
    pub first_transaction_sequence: u64,
    /// Number of price levels per side in instrument snapshots
    pub snapshot_depth: usize,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_order_id(mut self, first_order_id: u64) -> Self {
        self.first_order_id = first_order_id;
        self
    }

    pub fn with_first_transaction_sequence(mut self, sequence: u64) -> Self {
        self.first_transaction_sequence = sequence;
        self
    }

    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            first_order_id: 1,
            first_transaction_sequence: 1,
            snapshot_depth: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = EngineConfig::new()
            .with_first_order_id(500)
            .with_snapshot_depth(3);

        assert_eq!(config.first_order_id, 500);
        assert_eq!(config.first_transaction_sequence, 1);
        assert_eq!(config.snapshot_depth, 3);
    }
}

//! # Incentive Consensus
//!
//! Construction-capital incentive payouts for a block-producing state engine.
//!
//! Every block, the producer decides which locked positions have matured or
//! collected vote payouts, computes each payout exactly, and packs the result
//! into a bounded incentive transaction. Every validating node then drives
//! that transaction through the engine's operation evaluator.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: generation is a pure function of the chain snapshot;
//!    iteration order, rounding and the cap policy are consensus rules
//! 2. **Exact arithmetic**: payouts are computed as 256-bit rationals and
//!    truncated once
//! 3. **No ambient state**: chain state and configuration are passed in
//!    explicitly, so tests can supply synthetic snapshots
//! 4. **Fail closed**: invariant violations and evaluator rejections abort the
//!    block attempt; nothing is retried or masked
//!
//! ## Usage
//!
//! ```rust
//! use incentive_consensus::state::{ChainSnapshot, PositionIndex};
//! use incentive_consensus::types::*;
//! use incentive_consensus::IncentiveConsensus;
//!
//! let positions: PositionIndex = vec![LockedPosition {
//!     id: PositionId(1),
//!     owner: AccountId(9),
//!     amount: 10,
//!     total_periods: 3,
//!     period: 0,
//!     achieved: 0,
//!     next_slot: 0,
//!     pending: 0,
//! }]
//! .into_iter()
//! .collect();
//! let state = ChainSnapshot::new(ChainParameters::default(), DynamicProperties::default(), positions);
//!
//! let consensus = IncentiveConsensus::new();
//! let tx = consensus.generate_incentive_transaction(&state).unwrap();
//! assert_eq!(tx.incentive_operations().next().unwrap().amount, 3);
//! ```

pub mod arithmetic;
pub mod config;
pub mod constants;
pub mod economic;
pub mod error;
pub mod evaluation;
pub mod incentive;
pub mod serialization;
pub mod state;
pub mod transaction_hash;
pub mod types;

pub use error::{ConsensusError, Result};
pub use evaluation::{EvaluationContext, OperationEvaluator};
pub use state::{ChainSnapshot, ChainState, PositionIndex};
pub use types::*;

/// Incentive consensus - wrapper struct for the incentive entry points
///
/// All methods delegate to the corresponding module functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncentiveConsensus;

impl IncentiveConsensus {
    pub fn new() -> Self {
        Self
    }

    /// Build the incentive transaction for the next block
    pub fn generate_incentive_transaction<S: ChainState>(&self, state: &S) -> Result<Transaction> {
        incentive::generate_incentive_transaction(state)
    }

    /// Build the incentive transaction with explicit configuration
    pub fn generate_incentive_transaction_with_config<S: ChainState>(
        &self,
        state: &S,
        config: &config::IncentiveConfig,
    ) -> Result<Transaction> {
        incentive::generate_incentive_transaction_with_config(state, config)
    }

    /// Apply a transaction's operations through `evaluator`
    pub fn apply_incentive<E: OperationEvaluator + ?Sized>(
        &self,
        evaluator: &mut E,
        tx: &Transaction,
    ) -> Result<ProcessedTransaction> {
        evaluation::apply_incentive(evaluator, tx)
    }

    /// Payout for one incentive operation on `position`
    pub fn calculate_incentive_amount(
        &self,
        position: &LockedPosition,
        params: &ChainParameters,
    ) -> Result<Amount> {
        economic::calculate_incentive_amount(position, params)
    }

    /// Structural checks on a received incentive transaction
    pub fn check_incentive_transaction(
        &self,
        tx: &Transaction,
        params: &ChainParameters,
    ) -> Result<ValidationResult> {
        incentive::check_incentive_transaction(tx, params)
    }

    /// Transaction id of `tx`
    pub fn transaction_id(&self, tx: &Transaction) -> TransactionId {
        transaction_hash::calculate_transaction_id(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_then_apply() {
        let positions: PositionIndex = (1..=3)
            .map(|i| LockedPosition {
                id: PositionId(i),
                owner: AccountId(i),
                amount: 100 * i,
                total_periods: 1,
                period: 0,
                achieved: 0,
                next_slot: 0,
                pending: 0,
            })
            .collect();
        let state = ChainSnapshot::new(
            ChainParameters::default(),
            DynamicProperties::default(),
            positions,
        );
        let consensus = IncentiveConsensus::new();
        let tx = consensus.generate_incentive_transaction(&state).unwrap();

        let mut evaluator = |_: &EvaluationContext, op: &Operation| -> Result<OperationResult> {
            Ok(OperationResult::Amount(op.as_incentive().map_or(0, |i| i.amount)))
        };
        let processed = consensus.apply_incentive(&mut evaluator, &tx).unwrap();

        assert_eq!(
            processed.operation_results,
            vec![
                OperationResult::Amount(100),
                OperationResult::Amount(200),
                OperationResult::Amount(300),
            ]
        );
    }
}

//! Transaction application through the engine's operation evaluator
//!
//! ApplyIncentive: 𝒯𝒳 → 𝒫𝒯𝒳
//!
//! For transaction tx with operations o₀ … oₖ₋₁:
//! 1. rᵢ = evaluate(ctx, oᵢ) for i = 0 … k-1, in order
//! 2. If any evaluation fails, return that failure; o_{i+1} … are never evaluated
//! 3. Return (tx, [r₀ … rₖ₋₁])
//!
//! Works for any transaction, not only generated incentive ones. Signatures
//! are not checked here.

use crate::config::{get_incentive_config, DebugConfig};
use crate::error::Result;
use crate::types::*;
use tracing::{trace, warn};

/// Per-transaction evaluation state handed to the evaluator
///
/// Holds the index of the operation being evaluated (for error context) and
/// the results accumulated so far.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    current_op_in_trx: usize,
    operation_results: Vec<OperationResult>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the operation currently being evaluated
    #[inline]
    pub fn current_op_in_trx(&self) -> usize {
        self.current_op_in_trx
    }

    /// Results of the operations evaluated before the current one
    #[inline]
    pub fn operation_results(&self) -> &[OperationResult] {
        &self.operation_results
    }
}

/// Evaluates a single operation against engine state
///
/// Implemented by the engine. Returning an error rejects the operation, and
/// with it the whole transaction.
pub trait OperationEvaluator {
    fn evaluate(&mut self, context: &EvaluationContext, op: &Operation) -> Result<OperationResult>;
}

impl<F> OperationEvaluator for F
where
    F: FnMut(&EvaluationContext, &Operation) -> Result<OperationResult>,
{
    fn evaluate(&mut self, context: &EvaluationContext, op: &Operation) -> Result<OperationResult> {
        self(context, op)
    }
}

/// Apply every operation of `tx` in order
///
/// Uses the process-wide debug configuration. See [`apply_incentive_with_config`].
pub fn apply_incentive<E: OperationEvaluator + ?Sized>(
    evaluator: &mut E,
    tx: &Transaction,
) -> Result<ProcessedTransaction> {
    apply_incentive_with_config(evaluator, tx, &get_incentive_config().debug)
}

/// Apply every operation of `tx` in order with explicit debug configuration
///
/// The first evaluator error is returned unchanged; no partial result is
/// produced and nothing is retried.
pub fn apply_incentive_with_config<E: OperationEvaluator + ?Sized>(
    evaluator: &mut E,
    tx: &Transaction,
    debug: &DebugConfig,
) -> Result<ProcessedTransaction> {
    let mut context = EvaluationContext {
        current_op_in_trx: 0,
        operation_results: Vec::with_capacity(tx.operations.len()),
    };

    for op in &tx.operations {
        trace!(index = context.current_op_in_trx, tag = op.tag(), "evaluating operation");
        let result = match evaluator.evaluate(&context, op) {
            Ok(result) => result,
            Err(e) => {
                if debug.log_rejections {
                    warn!(index = context.current_op_in_trx, error = %e, "operation rejected");
                }
                return Err(e);
            }
        };
        context.operation_results.push(result);
        context.current_op_in_trx += 1;
    }

    // Runtime assertion: one result per operation, positionally aligned
    debug_assert_eq!(
        context.operation_results.len(),
        tx.operations.len(),
        "Result count must match operation count"
    );

    Ok(ProcessedTransaction {
        transaction: tx.clone(),
        operation_results: context.operation_results,
    })
}

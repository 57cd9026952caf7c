//! Incentive transaction generation
//!
//! GenerateIncentiveTransaction: 𝒮 → 𝒯𝒳
//!
//! For chain state s with head block time t and cap c:
//! 1. For each position p in ascending next-slot order with p.next_slot ≤ t,
//!    emit one operation (PeriodMaturity)
//! 2. For each position p in descending pending order with p.pending > 0,
//!    emit p.pending operations (VotePayout)
//! 3. Keep only the first c operations of that sequence
//! 4. Reference the head block and expire at t + 30s
//!
//! The output is consensus-visible: every producer must emit the same
//! operations in the same order, so the two scans and their orderings are
//! fixed.

use crate::config::{get_incentive_config, IncentiveConfig};
use crate::economic::calculate_incentive_amount;
use crate::error::{ConsensusError, Result};
use crate::state::ChainState;
use crate::types::*;
use tracing::{debug, info};

/// Build the incentive transaction for the next block
///
/// Uses the process-wide configuration (see [`get_incentive_config`]). See
/// [`generate_incentive_transaction_with_config`].
pub fn generate_incentive_transaction<S: ChainState>(state: &S) -> Result<Transaction> {
    generate_incentive_transaction_with_config(state, &get_incentive_config())
}

/// Build the incentive transaction for the next block with explicit configuration
///
/// Returns an unsigned transaction holding at most the per-block cap of
/// incentive operations. Fails only on invariant violations in the chain
/// state (zero total periods, zero rate scale, amount overflow), which abort
/// block production.
pub fn generate_incentive_transaction_with_config<S: ChainState>(
    state: &S,
    config: &IncentiveConfig,
) -> Result<Transaction> {
    let params = state.global_parameters();
    params.validate()?;

    let cap = config
        .generator
        .operation_cap(params.max_incentive_operations_per_block);
    let head_time = state.head_block_time();
    let log_ops = config.debug.log_emitted_operations;

    let mut tx = Transaction::default();

    // The cap drops every candidate once the transaction is full, so stopping
    // the scans at that point yields the same operations in the same order as
    // scanning to the end. Do not reorder the scans or move the cap check
    // after the amount computation: both change which operations make it in.
    let mut matured = 0usize;
    for position in state
        .positions_by_next_slot()
        .take_while(|p| p.next_slot <= head_time)
    {
        if tx.operations.len() >= cap {
            break;
        }
        let amount = calculate_incentive_amount(position, params)?;
        push_incentive(&mut tx, position, amount, IncentiveReason::PeriodMaturity, log_ops);
        matured += 1;
    }

    let mut voted = 0usize;
    'votes: for position in state.positions_by_pending().take_while(|p| p.pending > 0) {
        if tx.operations.len() >= cap {
            break;
        }
        // Vote payouts use the maturity formula; one computation serves all copies
        let amount = calculate_incentive_amount(position, params)?;
        for _ in 0..position.pending {
            if tx.operations.len() >= cap {
                break 'votes;
            }
            push_incentive(&mut tx, position, amount, IncentiveReason::VotePayout, log_ops);
            voted += 1;
        }
    }

    let dyn_props = state.dynamic_properties();
    tx.set_reference_block(&dyn_props.head_block_id);
    let expiration = dyn_props
        .time
        .checked_add(config.generator.expiration_seconds)
        .ok_or_else(|| {
            ConsensusError::InvariantViolation("incentive transaction expiration overflow".into())
        })?;
    tx.set_expiration(expiration);

    // Runtime assertion: the cap always holds
    debug_assert!(
        tx.operations.len() <= cap,
        "Incentive operations ({}) must be <= cap ({cap})",
        tx.operations.len()
    );

    info!(
        head_block = dyn_props.head_block_number,
        matured,
        voted,
        cap,
        "generated incentive transaction"
    );

    Ok(tx)
}

fn push_incentive(
    tx: &mut Transaction,
    position: &LockedPosition,
    amount: Amount,
    reason: IncentiveReason,
    log: bool,
) {
    let op = IncentiveOperation {
        amount,
        position_id: position.id,
        reason,
    };
    if log {
        debug!(
            position = %op.position_id,
            owner = position.owner.0,
            amount = op.amount,
            reason = ?op.reason,
            "incentive"
        );
    }
    tx.operations.push(Operation::Incentive(op));
}

/// CheckIncentiveTransaction: 𝒯𝒳 × 𝒢 → {valid, invalid}
///
/// Structural checks a validator runs on a received incentive transaction
/// before applying it, with the process-wide configuration:
/// 1. |tx.operations| ≤ cap (the generator's effective cap)
/// 2. every operation is an incentive operation
pub fn check_incentive_transaction(
    tx: &Transaction,
    params: &ChainParameters,
) -> Result<ValidationResult> {
    check_incentive_transaction_with_config(tx, params, &get_incentive_config())
}

/// Structural checks with explicit configuration
///
/// The cap is the same one the generator applies, so a test network running
/// with `max_operations_override` accepts what it generates.
pub fn check_incentive_transaction_with_config(
    tx: &Transaction,
    params: &ChainParameters,
    config: &IncentiveConfig,
) -> Result<ValidationResult> {
    params.validate()?;

    let cap = config
        .generator
        .operation_cap(params.max_incentive_operations_per_block);
    if tx.operations.len() > cap {
        return Ok(ValidationResult::Invalid(format!(
            "Too many incentive operations: {} > {cap}",
            tx.operations.len()
        )));
    }

    if let Some(index) = tx
        .operations
        .iter()
        .position(|op| op.as_incentive().is_none())
    {
        return Ok(ValidationResult::Invalid(format!(
            "Operation {index} is not an incentive operation"
        )));
    }

    Ok(ValidationResult::Valid)
}

//! Incentive payout arithmetic
//!
//! For a locked position p and chain parameters g:
//!
//! ```text
//! installment = p.amount / p.total_periods
//! interest    = p.amount * p.period / SECONDS_PER_YEAR * g.issuance_rate / g.issuance_rate_scale
//! amount      = ⌊installment + interest⌋
//! ```
//!
//! Both terms are exact rationals; only the sum is truncated. The fractional
//! remainder is dropped, not carried to the next payout, so over a position's
//! whole life the installments add up to slightly less than the principal.
//! Every node truncates identically, which keeps the rule deterministic;
//! changing it to carry a running remainder would be a consensus change.

use crate::arithmetic::Ratio;
use crate::constants::SECONDS_PER_YEAR;
use crate::error::{ConsensusError, Result};
use crate::types::*;

/// Principal repaid by one installment: amount / total_periods (exact)
pub fn calculate_principal_installment(position: &LockedPosition) -> Result<Ratio> {
    if position.total_periods == 0 {
        return Err(ConsensusError::InvariantViolation(
            format!("locked position {} has zero total periods", position.id).into(),
        ));
    }
    Ratio::from_integer(position.amount).div_int(position.total_periods as u64)
}

/// Interest accrued over one period (exact)
pub fn calculate_interest_accrual(
    position: &LockedPosition,
    params: &ChainParameters,
) -> Result<Ratio> {
    if params.issuance_rate_scale == 0 {
        return Err(ConsensusError::InvalidParameters(
            "issuance_rate_scale must be positive".into(),
        ));
    }
    Ratio::from_integer(position.amount)
        .mul_int(position.period as u64)?
        .div_int(SECONDS_PER_YEAR)?
        .mul_int(params.issuance_rate)?
        .div_int(params.issuance_rate_scale)
}

/// Amount paid by one incentive operation for `position`
///
/// Maturity-driven and vote-driven payouts use the same formula.
pub fn calculate_incentive_amount(
    position: &LockedPosition,
    params: &ChainParameters,
) -> Result<Amount> {
    let installment = calculate_principal_installment(position)?;
    let interest = calculate_interest_accrual(position, params)?;
    let amount = installment.add(&interest)?.floor_u64()?;

    // Runtime assertion: without interest a single payout never exceeds the principal
    debug_assert!(
        params.issuance_rate != 0 || amount <= position.amount,
        "Incentive amount ({amount}) must be <= principal ({}) when no interest accrues",
        position.amount
    );

    Ok(amount)
}

/// Principal returned after `installments` interest-free payouts
///
/// Each installment is truncated on its own, so the result never exceeds
/// `position.amount` while `installments <= total_periods`.
pub fn total_principal_paid(position: &LockedPosition, installments: u16) -> Result<Amount> {
    let per_installment = calculate_principal_installment(position)?.floor_u64()?;
    per_installment
        .checked_mul(installments as u64)
        .ok_or_else(|| ConsensusError::InvariantViolation("principal total overflow".into()))
}

/// Principal that truncation leaves unpaid once every installment is made
pub fn rounding_shortfall(position: &LockedPosition) -> Result<Amount> {
    let paid = total_principal_paid(position, position.total_periods)?;
    Ok(position.amount - paid)
}

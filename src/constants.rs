//! Incentive consensus constants

/// Seconds in a (non-leap) year: 60 × 60 × 24 × 365
///
/// Interest accrual is normalized against this value, so a position whose
/// `period` equals one year accrues exactly `issuance_rate / issuance_rate_scale`
/// of its principal per payout.
pub const SECONDS_PER_YEAR: u64 = 60 * 60 * 24 * 365;

/// Default normalization scale for the issuance rate (basis points)
///
/// An `issuance_rate` of 500 with this scale means 5% per year.
pub const ISSUANCE_RATE_SCALE: u64 = 10_000;

/// Default cap on incentive operations emitted in a single block
pub const DEFAULT_MAX_INCENTIVE_OPERATIONS_PER_BLOCK: u32 = 1000;

/// Default issuance rate (basis points of principal per year)
pub const DEFAULT_ISSUANCE_RATE: u64 = 0;

/// Lifetime of a generated incentive transaction, counted from head block time
pub const INCENTIVE_TX_EXPIRATION_SECONDS: u64 = 30;

/// Length of a block id in bytes
pub const BLOCK_ID_SIZE: usize = 20;

/// Length of a transaction id in bytes (truncated SHA-256)
pub const TRANSACTION_ID_SIZE: usize = 20;

/// Upper bound on operations accepted by the decoder for a single transaction
///
/// Well above any sane `max_incentive_operations_per_block`; protects the
/// decoder from allocating on attacker-controlled counts.
pub const MAX_TRANSACTION_OPERATIONS: u64 = 100_000;

/// Upper bound on signatures accepted by the decoder for a single transaction
pub const MAX_TRANSACTION_SIGNATURES: u64 = 1_000;

/// Upper bound on the size of a single encoded signature
pub const MAX_SIGNATURE_SIZE: u64 = 1_024;

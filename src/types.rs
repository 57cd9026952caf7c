//! Core types for construction-capital incentives

use crate::constants::*;
use crate::error::{ConsensusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token quantity
pub type Amount = u64;

/// Seconds since the Unix epoch
pub type Timestamp = u64;

/// Byte string type
pub type ByteString = Vec<u8>;

/// Transaction id: truncated SHA-256 of the digest encoding
pub type TransactionId = [u8; TRANSACTION_ID_SIZE];

/// Locked position id: newtype wrapper for type safety
///
/// Ids are assigned by the engine in creation order, so comparing two ids
/// compares creation order.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionId(pub u64);

impl PositionId {
    #[inline]
    pub fn new(id: u64) -> Self {
        PositionId(id)
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for PositionId {
    #[inline]
    fn from(id: u64) -> Self {
        PositionId(id)
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cc#{}", self.0)
    }
}

/// Account id of a position's beneficiary
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl From<u64> for AccountId {
    #[inline]
    fn from(id: u64) -> Self {
        AccountId(id)
    }
}

/// Block id: 160-bit block hash whose first four bytes carry the
/// big-endian block number
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockId(pub [u8; BLOCK_ID_SIZE]);

impl BlockId {
    #[inline]
    pub fn new(bytes: [u8; BLOCK_ID_SIZE]) -> Self {
        BlockId(bytes)
    }

    /// Build an id for `block_num` whose remaining bytes come from `hash`
    pub fn from_num_and_hash(block_num: u32, hash: &[u8; BLOCK_ID_SIZE]) -> Self {
        let mut bytes = *hash;
        bytes[..4].copy_from_slice(&block_num.to_be_bytes());
        BlockId(bytes)
    }

    /// Block number encoded in the first four bytes
    #[inline]
    pub fn block_num(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Transaction reference prefix: bytes 4..8 read little-endian
    #[inline]
    pub fn ref_prefix(&self) -> u32 {
        u32::from_le_bytes([self.0[4], self.0[5], self.0[6], self.0[7]])
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; BLOCK_ID_SIZE] {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Locked position ("construction capital")
///
/// Owned and mutated by the engine; incentive generation only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPosition {
    pub id: PositionId,
    pub owner: AccountId,
    /// Locked principal
    pub amount: Amount,
    /// Number of scheduled principal installments (≥ 1)
    pub total_periods: u16,
    /// Length of one payout cycle in seconds
    pub period: u32,
    /// Installments already paid
    pub achieved: u16,
    /// Next maturity time
    pub next_slot: Timestamp,
    /// Outstanding vote-triggered payouts
    pub pending: u16,
}

/// Global chain parameters relevant to incentives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParameters {
    pub max_incentive_operations_per_block: u32,
    pub issuance_rate: u64,
    pub issuance_rate_scale: u64,
}

impl Default for ChainParameters {
    fn default() -> Self {
        Self {
            max_incentive_operations_per_block: DEFAULT_MAX_INCENTIVE_OPERATIONS_PER_BLOCK,
            issuance_rate: DEFAULT_ISSUANCE_RATE,
            issuance_rate_scale: ISSUANCE_RATE_SCALE,
        }
    }
}

impl ChainParameters {
    /// Check the invariants the incentive arithmetic relies on
    pub fn validate(&self) -> Result<()> {
        if self.issuance_rate_scale == 0 {
            return Err(ConsensusError::InvalidParameters(
                "issuance_rate_scale must be positive".into(),
            ));
        }
        if self.max_incentive_operations_per_block == 0 {
            return Err(ConsensusError::InvalidParameters(
                "max_incentive_operations_per_block must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Dynamic global properties: the current head block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DynamicProperties {
    pub head_block_number: u32,
    pub head_block_id: BlockId,
    /// Head block time
    pub time: Timestamp,
}

/// Why an incentive was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IncentiveReason {
    /// The position's next slot has passed
    PeriodMaturity = 0,
    /// The position has accumulated pending votes
    VotePayout = 1,
}

impl IncentiveReason {
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(IncentiveReason::PeriodMaturity),
            1 => Ok(IncentiveReason::VotePayout),
            _ => Err(ConsensusError::Serialization(
                format!("Unknown incentive reason: {byte}").into(),
            )),
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Credits `amount` to the beneficiary of `position_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentiveOperation {
    pub amount: Amount,
    pub position_id: PositionId,
    pub reason: IncentiveReason,
}

/// Ledger operation
///
/// Only the incentive operation is defined here; the evaluator that
/// interprets operations belongs to the engine.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Incentive(IncentiveOperation),
}

impl Operation {
    /// Wire tag of the operation type
    pub fn tag(&self) -> u64 {
        match self {
            Operation::Incentive(_) => 0,
        }
    }

    pub fn as_incentive(&self) -> Option<&IncentiveOperation> {
        match self {
            Operation::Incentive(op) => Some(op),
        }
    }
}

impl From<IncentiveOperation> for Operation {
    fn from(op: IncentiveOperation) -> Self {
        Operation::Incentive(op)
    }
}

/// Result of evaluating one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationResult {
    Void,
    Amount(Amount),
}

/// Transaction: TaPoS reference, expiration, ordered operations
///
/// Operation order is the consensus-visible evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Low 16 bits of the referenced block number
    pub ref_block_num: u16,
    /// Bytes 4..8 of the referenced block id
    pub ref_block_prefix: u32,
    pub expiration: Timestamp,
    pub operations: Vec<Operation>,
    /// Attached by the (external) signer; not part of the digest
    pub signatures: Vec<ByteString>,
}

impl Transaction {
    /// Point the transaction at `block_id`
    pub fn set_reference_block(&mut self, block_id: &BlockId) {
        self.ref_block_num = (block_id.block_num() & 0xffff) as u16;
        self.ref_block_prefix = block_id.ref_prefix();
    }

    pub fn set_expiration(&mut self, expiration: Timestamp) {
        self.expiration = expiration;
    }

    /// Whether the reference fields match `block_id`
    pub fn references_block(&self, block_id: &BlockId) -> bool {
        self.ref_block_num == (block_id.block_num() & 0xffff) as u16
            && self.ref_block_prefix == block_id.ref_prefix()
    }

    /// Incentive operations in order, skipping any other kind
    pub fn incentive_operations(&self) -> impl Iterator<Item = &IncentiveOperation> + '_ {
        self.operations.iter().filter_map(Operation::as_incentive)
    }
}

/// Transaction plus one result per operation, positionally aligned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedTransaction {
    pub transaction: Transaction,
    pub operation_results: Vec<OperationResult>,
}

impl ProcessedTransaction {
    pub fn operations(&self) -> &[Operation] {
        &self.transaction.operations
    }
}

/// Validation result
#[must_use = "Validation result must be checked - ignoring may cause consensus violations"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

//! Transaction wire format
//!
//! Format:
//! - ref_block_num (2 bytes)
//! - ref_block_prefix (4 bytes)
//! - expiration (8 bytes)
//! - operation count (VarInt)
//! - for each operation:
//!   - operation tag (VarInt)
//!   - incentive (tag 0): amount (8 bytes), position id (8 bytes), reason (1 byte)
//! - signature count (VarInt)
//! - for each signature: length (VarInt), bytes
//!
//! The digest form stops before the signature count.

use super::varint::{decode_varint, write_varint};
use crate::constants::*;
use crate::error::{ConsensusError, Result};
use crate::types::*;
use thiserror::Error;

/// Transaction parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionParseError {
    #[error("Insufficient bytes to parse transaction")]
    InsufficientBytes,
    #[error("Invalid operation count: {0}")]
    InvalidOperationCount(u64),
    #[error("Unknown operation tag: {0}")]
    UnknownOperation(u64),
    #[error("Invalid signature count: {0}")]
    InvalidSignatureCount(u64),
    #[error("Invalid signature length: {0}")]
    InvalidSignatureLength(u64),
    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),
}

impl From<TransactionParseError> for ConsensusError {
    fn from(e: TransactionParseError) -> Self {
        ConsensusError::Serialization(e.to_string().into())
    }
}

const INCENTIVE_OPERATION_SIZE: usize = 8 + 8 + 1;

fn write_operation(out: &mut Vec<u8>, op: &Operation) {
    write_varint(out, op.tag());
    match op {
        Operation::Incentive(incentive) => {
            out.extend_from_slice(&incentive.amount.to_le_bytes());
            out.extend_from_slice(&incentive.position_id.0.to_le_bytes());
            out.push(incentive.reason.as_byte());
        }
    }
}

fn write_digest(out: &mut Vec<u8>, tx: &Transaction) {
    out.extend_from_slice(&tx.ref_block_num.to_le_bytes());
    out.extend_from_slice(&tx.ref_block_prefix.to_le_bytes());
    out.extend_from_slice(&tx.expiration.to_le_bytes());
    write_varint(out, tx.operations.len() as u64);
    for op in &tx.operations {
        write_operation(out, op);
    }
}

/// Serialize the signed part of a transaction (no signatures)
pub fn serialize_transaction_digest(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + 4 + 8 + 1 + tx.operations.len() * (1 + INCENTIVE_OPERATION_SIZE));
    write_digest(&mut out, tx);
    out
}

/// Serialize a full transaction including signatures
pub fn serialize_transaction(tx: &Transaction) -> Vec<u8> {
    let mut out = serialize_transaction_digest(tx);
    write_varint(&mut out, tx.signatures.len() as u64);
    for signature in &tx.signatures {
        write_varint(&mut out, signature.len() as u64);
        out.extend_from_slice(signature);
    }
    out
}

/// Cursor over an input buffer
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(TransactionParseError::InsufficientBytes)?;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(TransactionParseError::InsufficientBytes)?;
        self.offset = end;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn varint(&mut self) -> Result<u64> {
        let (value, len) = decode_varint(&self.data[self.offset..])?;
        self.offset += len;
        Ok(value)
    }
}

fn read_operation(reader: &mut Reader<'_>) -> Result<Operation> {
    match reader.varint()? {
        0 => {
            let amount = u64::from_le_bytes(reader.array()?);
            let position_id = PositionId(u64::from_le_bytes(reader.array()?));
            let reason = IncentiveReason::from_byte(reader.array::<1>()?[0])?;
            Ok(Operation::Incentive(IncentiveOperation {
                amount,
                position_id,
                reason,
            }))
        }
        tag => Err(TransactionParseError::UnknownOperation(tag).into()),
    }
}

/// Deserialize a full transaction; the whole buffer must be consumed
pub fn deserialize_transaction(data: &[u8]) -> Result<Transaction> {
    let mut reader = Reader { data, offset: 0 };

    let ref_block_num = u16::from_le_bytes(reader.array()?);
    let ref_block_prefix = u32::from_le_bytes(reader.array()?);
    let expiration = u64::from_le_bytes(reader.array()?);

    let op_count = reader.varint()?;
    if op_count > MAX_TRANSACTION_OPERATIONS {
        return Err(TransactionParseError::InvalidOperationCount(op_count).into());
    }
    let mut operations = Vec::with_capacity(op_count as usize);
    for _ in 0..op_count {
        operations.push(read_operation(&mut reader)?);
    }

    let sig_count = reader.varint()?;
    if sig_count > MAX_TRANSACTION_SIGNATURES {
        return Err(TransactionParseError::InvalidSignatureCount(sig_count).into());
    }
    let mut signatures = Vec::with_capacity(sig_count as usize);
    for _ in 0..sig_count {
        let len = reader.varint()?;
        if len > MAX_SIGNATURE_SIZE {
            return Err(TransactionParseError::InvalidSignatureLength(len).into());
        }
        signatures.push(reader.take(len as usize)?.to_vec());
    }

    if reader.offset != data.len() {
        return Err(TransactionParseError::TrailingBytes(data.len() - reader.offset).into());
    }

    Ok(Transaction {
        ref_block_num,
        ref_block_prefix,
        expiration,
        operations,
        signatures,
    })
}

//! Transaction id calculation
//!
//! The id is the first 20 bytes of SHA-256 over the digest encoding, so
//! signing a transaction does not change its id.

use crate::constants::TRANSACTION_ID_SIZE;
use crate::serialization::transaction::serialize_transaction_digest;
use crate::types::*;
use sha2::{Digest, Sha256};

/// SHA-256 of the digest encoding
pub fn calculate_transaction_digest(tx: &Transaction) -> [u8; 32] {
    Sha256::digest(serialize_transaction_digest(tx)).into()
}

/// Transaction id: truncated digest
pub fn calculate_transaction_id(tx: &Transaction) -> TransactionId {
    let digest = calculate_transaction_digest(tx);
    let mut id = [0u8; TRANSACTION_ID_SIZE];
    id.copy_from_slice(&digest[..TRANSACTION_ID_SIZE]);
    id
}

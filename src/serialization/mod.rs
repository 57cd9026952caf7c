//! Canonical wire encoding for incentive transactions
//!
//! All integers are little-endian. The digest encoding (everything except
//! signatures) is what the transaction id commits to.

pub mod transaction;
pub mod varint;

pub use transaction::{deserialize_transaction, serialize_transaction, serialize_transaction_digest};
pub use varint::{decode_varint, encode_varint, VarIntError};

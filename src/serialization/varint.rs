//! VarInt (CompactSize) encoding for counts and lengths
//!
//! Encoding rules:
//! - value < 0xfd: single byte
//! - value <= 0xffff: 0xfd prefix + 2 bytes (little-endian)
//! - value <= 0xffffffff: 0xfe prefix + 4 bytes (little-endian)
//! - otherwise: 0xff prefix + 8 bytes (little-endian)
//!
//! Decoding accepts only the shortest encoding of a value, so every value
//! has exactly one byte representation and transaction ids are unambiguous.

use crate::error::{ConsensusError, Result};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VarIntError {
    #[error("Insufficient bytes to decode VarInt")]
    InsufficientBytes,
    #[error("Non-canonical VarInt encoding")]
    NonCanonical,
}

impl From<VarIntError> for ConsensusError {
    fn from(e: VarIntError) -> Self {
        ConsensusError::Serialization(e.to_string().into())
    }
}

/// Append the VarInt encoding of `value` to `out`
///
/// ```
/// use incentive_consensus::serialization::varint::write_varint;
///
/// let mut out = Vec::new();
/// write_varint(&mut out, 253);
/// assert_eq!(out, vec![0xfd, 253, 0]);
/// ```
pub fn write_varint(out: &mut Vec<u8>, value: u64) {
    if value < 0xfd {
        out.push(value as u8);
    } else if value <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Encode `value` as a fresh VarInt
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    write_varint(&mut out, value);
    out
}

/// Decode a VarInt, returning the value and the number of bytes consumed
///
/// ```
/// use incentive_consensus::serialization::varint::decode_varint;
///
/// assert_eq!(decode_varint(&[252]), Ok((252, 1)));
/// assert_eq!(decode_varint(&[0xfe, 0, 0, 1, 0]), Ok((65536, 5)));
/// assert!(decode_varint(&[0xfd, 1, 0]).is_err()); // 1 must be one byte
/// assert!(decode_varint(&[]).is_err());
/// ```
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let first = *data.first().ok_or(VarIntError::InsufficientBytes)?;

    let (width, min) = match first {
        b if b < 0xfd => return Ok((b as u64, 1)),
        0xfd => (2, 0xfd),
        0xfe => (4, 0x1_0000),
        _ => (8, 0x1_0000_0000),
    };

    let bytes = data
        .get(1..1 + width)
        .ok_or(VarIntError::InsufficientBytes)?;
    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(bytes);
    let value = u64::from_le_bytes(buf);

    if value < min {
        return Err(VarIntError::NonCanonical.into());
    }

    Ok((value, 1 + width))
}

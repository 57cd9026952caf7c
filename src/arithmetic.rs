//! Extended-precision arithmetic for incentive amounts
//!
//! Payout amounts are computed as exact rationals over 256-bit integers and
//! truncated to a token quantity only once, at the very end. Native 64-bit
//! arithmetic would overflow on `amount * period * issuance_rate` for large
//! balances, and dividing early would make the result depend on evaluation
//! order.

use crate::error::{ConsensusError, Result};
use std::cmp::Ordering;

/// 256-bit unsigned integer, little-endian limbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U256([u64; 4]);

impl U256 {
    pub const ZERO: U256 = U256([0; 4]);
    pub const ONE: U256 = U256([1, 0, 0, 0]);
    pub const MAX: U256 = U256([u64::MAX; 4]);

    #[inline]
    pub fn from_u64(value: u64) -> Self {
        U256([value, 0, 0, 0])
    }

    #[inline]
    pub fn from_u128(value: u128) -> Self {
        U256([value as u64, (value >> 64) as u64, 0, 0])
    }

    /// Narrow to u64, `None` if any high limb is set
    pub fn to_u64(&self) -> Option<u64> {
        if self.0[1..].iter().any(|&w| w != 0) {
            return None;
        }
        Some(self.0[0])
    }

    /// Narrow to u128, `None` if either high limb is set
    pub fn to_u128(&self) -> Option<u128> {
        if self.0[2] != 0 || self.0[3] != 0 {
            return None;
        }
        Some((self.0[0] as u128) | ((self.0[1] as u128) << 64))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0)
    }

    /// Position of the highest set bit (0-indexed from the LSB), `None` for zero
    pub fn highest_set_bit(&self) -> Option<u32> {
        for (i, &word) in self.0.iter().enumerate().rev() {
            if word != 0 {
                return Some(i as u32 * 64 + (63 - word.leading_zeros()));
            }
        }
        None
    }

    #[inline]
    fn bit(&self, index: u32) -> bool {
        (self.0[(index / 64) as usize] >> (index % 64)) & 1 == 1
    }

    #[inline]
    fn set_bit(&mut self, index: u32) {
        self.0[(index / 64) as usize] |= 1u64 << (index % 64);
    }

    /// Shift left by one bit, dropping the top bit
    fn shl1(&self) -> Self {
        let mut result = U256::ZERO;
        let mut carry = 0u64;
        for i in 0..4 {
            result.0[i] = (self.0[i] << 1) | carry;
            carry = self.0[i] >> 63;
        }
        result
    }

    pub fn checked_add(&self, rhs: &U256) -> Option<Self> {
        let mut result = U256::ZERO;
        let mut carry = false;
        for i in 0..4 {
            let (sum, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum, c2) = sum.overflowing_add(carry as u64);
            result.0[i] = sum;
            carry = c1 || c2;
        }
        if carry {
            return None;
        }
        Some(result)
    }

    /// Subtraction modulo 2^256, with a borrow flag
    fn overflowing_sub(&self, rhs: &U256) -> (Self, bool) {
        let mut result = U256::ZERO;
        let mut borrow = false;
        for i in 0..4 {
            let (diff, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff, b2) = diff.overflowing_sub(borrow as u64);
            result.0[i] = diff;
            borrow = b1 || b2;
        }
        (result, borrow)
    }

    pub fn checked_sub(&self, rhs: &U256) -> Option<Self> {
        match self.overflowing_sub(rhs) {
            (result, false) => Some(result),
            (_, true) => None,
        }
    }

    /// Full 256 × 256 multiplication, `None` if the product needs more than 256 bits
    pub fn checked_mul(&self, rhs: &U256) -> Option<Self> {
        let mut wide = [0u64; 8];
        for i in 0..4 {
            if self.0[i] == 0 {
                continue;
            }
            let mut carry = 0u128;
            for j in 0..4 {
                let cur = wide[i + j] as u128 + (self.0[i] as u128) * (rhs.0[j] as u128) + carry;
                wide[i + j] = cur as u64;
                carry = cur >> 64;
            }
            wide[i + 4] = carry as u64;
        }
        if wide[4..].iter().any(|&w| w != 0) {
            return None;
        }
        Some(U256([wide[0], wide[1], wide[2], wide[3]]))
    }

    /// Multiply by u64 with overflow checking
    pub fn checked_mul_u64(&self, rhs: u64) -> Option<Self> {
        let mut carry = 0u128;
        let mut result = U256::ZERO;
        for i in 0..4 {
            let product = (self.0[i] as u128) * (rhs as u128) + carry;
            result.0[i] = product as u64;
            carry = product >> 64;
        }
        if carry > 0 {
            return None;
        }
        Some(result)
    }

    /// Long division, `None` for a zero divisor
    ///
    /// Mathematical invariants:
    /// - quotient * rhs + remainder = self
    /// - remainder < rhs
    pub fn checked_div_rem(&self, rhs: &U256) -> Option<(Self, Self)> {
        if rhs.is_zero() {
            return None;
        }
        if self < rhs {
            return Some((U256::ZERO, *self));
        }

        let mut quotient = U256::ZERO;
        let mut remainder = U256::ZERO;
        let top = self.highest_set_bit().unwrap_or(0);
        for i in (0..=top).rev() {
            // remainder < rhs, so 2 * remainder + 1 < 2 * rhs; a carry out of
            // bit 255 therefore always means the subtraction below is due.
            let carry = remainder.bit(255);
            remainder = remainder.shl1();
            if self.bit(i) {
                remainder.0[0] |= 1;
            }
            if carry || remainder >= *rhs {
                remainder = remainder.overflowing_sub(rhs).0;
                quotient.set_bit(i);
            }
        }

        debug_assert!(
            remainder < *rhs,
            "Remainder ({remainder:?}) must be < divisor ({rhs:?})"
        );
        debug_assert!(
            quotient <= *self,
            "Quotient ({quotient:?}) must be <= dividend ({self:?})"
        );

        Some((quotient, remainder))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        U256::from_u64(value)
    }
}

#[cold]
fn overflow_error(what: &'static str) -> ConsensusError {
    ConsensusError::InvariantViolation(format!("256-bit overflow in {what}").into())
}

/// Exact non-negative rational `numer / denom`
///
/// Never reduced; callers keep operand sizes small enough that the
/// unreduced form fits in 256 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    numer: U256,
    denom: U256,
}

impl Ratio {
    pub fn from_integer(value: u64) -> Self {
        Ratio {
            numer: U256::from_u64(value),
            denom: U256::ONE,
        }
    }

    pub fn zero() -> Self {
        Ratio::from_integer(0)
    }

    pub fn numer(&self) -> &U256 {
        &self.numer
    }

    pub fn denom(&self) -> &U256 {
        &self.denom
    }

    /// self × rhs
    pub fn mul_int(self, rhs: u64) -> Result<Self> {
        let numer = self
            .numer
            .checked_mul_u64(rhs)
            .ok_or_else(|| overflow_error("ratio multiplication"))?;
        Ok(Ratio {
            numer,
            denom: self.denom,
        })
    }

    /// self ÷ rhs
    pub fn div_int(self, rhs: u64) -> Result<Self> {
        if rhs == 0 {
            return Err(ConsensusError::InvariantViolation(
                "ratio division by zero".into(),
            ));
        }
        let denom = self
            .denom
            .checked_mul_u64(rhs)
            .ok_or_else(|| overflow_error("ratio division"))?;
        Ok(Ratio {
            numer: self.numer,
            denom,
        })
    }

    /// self + rhs
    pub fn add(self, rhs: &Ratio) -> Result<Self> {
        if self.denom == rhs.denom {
            let numer = self
                .numer
                .checked_add(&rhs.numer)
                .ok_or_else(|| overflow_error("ratio addition"))?;
            return Ok(Ratio {
                numer,
                denom: self.denom,
            });
        }
        let left = self
            .numer
            .checked_mul(&rhs.denom)
            .ok_or_else(|| overflow_error("ratio addition"))?;
        let right = rhs
            .numer
            .checked_mul(&self.denom)
            .ok_or_else(|| overflow_error("ratio addition"))?;
        let numer = left
            .checked_add(&right)
            .ok_or_else(|| overflow_error("ratio addition"))?;
        let denom = self
            .denom
            .checked_mul(&rhs.denom)
            .ok_or_else(|| overflow_error("ratio addition"))?;
        Ok(Ratio { numer, denom })
    }

    /// ⌊self⌋
    pub fn floor(&self) -> U256 {
        // denom is never zero: it starts at one and is only multiplied by
        // non-zero values.
        self.numer
            .checked_div_rem(&self.denom)
            .map(|(q, _)| q)
            .unwrap_or(U256::ZERO)
    }

    /// ⌊self⌋ as a token quantity
    pub fn floor_u64(&self) -> Result<u64> {
        self.floor().to_u64().ok_or_else(|| {
            ConsensusError::InvariantViolation("incentive amount exceeds u64".into())
        })
    }

    /// Whether the value is a whole number
    pub fn is_integer(&self) -> bool {
        matches!(self.numer.checked_div_rem(&self.denom), Some((_, r)) if r.is_zero())
    }
}

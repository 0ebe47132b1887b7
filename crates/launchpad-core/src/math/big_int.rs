//! Wide multiplication for fixed-point products
//!
//! `price * units` for 18-decimal operands exceeds `u128` long before either
//! operand does, so products are formed in 256 bits and divided back down.

use crate::errors::{LaunchpadError, LaunchpadResult};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// 256-bit unsigned integer for intermediate calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U256 {
    /// Low 128 bits
    pub lo: u128,
    /// High 128 bits
    pub hi: u128,
}

const LOW_64: u128 = u64::MAX as u128;

impl U256 {
    /// Create a new U256 from low and high parts
    pub const fn new(lo: u128, hi: u128) -> Self {
        Self { lo, hi }
    }

    /// Create from a single u128 value
    pub const fn from_u128(value: u128) -> Self {
        Self { lo: value, hi: 0 }
    }

    /// Check if the value is zero
    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Convert to u128, returning None if overflow
    pub fn to_u128(&self) -> Option<u128> {
        if self.hi == 0 {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Full product of two u128 values
    pub fn mul_u128(a: u128, b: u128) -> Self {
        let (a_lo, a_hi) = (a & LOW_64, a >> 64);
        let (b_lo, b_hi) = (b & LOW_64, b >> 64);

        let lo_lo = a_lo * b_lo;
        let lo_hi = a_lo * b_hi;
        let hi_lo = a_hi * b_lo;
        let hi_hi = a_hi * b_hi;

        // Each term is below 2^64, so the sum fits comfortably
        let mid = (lo_lo >> 64) + (lo_hi & LOW_64) + (hi_lo & LOW_64);

        let lo = (lo_lo & LOW_64) | (mid << 64);
        let hi = hi_hi + (lo_hi >> 64) + (hi_lo >> 64) + (mid >> 64);
        Self::new(lo, hi)
    }

    /// Divide by a u128 divisor, returning (quotient, remainder)
    pub fn div_rem_u128(&self, divisor: u128) -> Option<(U256, u128)> {
        if divisor == 0 {
            return None;
        }

        if self.hi == 0 {
            return Some((U256::from_u128(self.lo / divisor), self.lo % divisor));
        }

        // Restoring shift-subtract division over all 256 bits
        let mut quotient = U256::default();
        let mut remainder: u128 = 0;
        for bit in (0..256u32).rev() {
            let carry = remainder >> 127;
            remainder = (remainder << 1) | self.bit(bit);
            if carry == 1 || remainder >= divisor {
                remainder = remainder.wrapping_sub(divisor);
                quotient.set_bit(bit);
            }
        }
        Some((quotient, remainder))
    }

    fn bit(&self, index: u32) -> u128 {
        if index < 128 {
            (self.lo >> index) & 1
        } else {
            (self.hi >> (index - 128)) & 1
        }
    }

    fn set_bit(&mut self, index: u32) {
        if index < 128 {
            self.lo |= 1u128 << index;
        } else {
            self.hi |= 1u128 << (index - 128);
        }
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.hi.cmp(&other.hi) {
            std::cmp::Ordering::Equal => self.lo.cmp(&other.lo),
            ordering => ordering,
        }
    }
}

/// Multiply two u128 values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div_u128(
    a: u128,
    b: u128,
    denominator: u128,
    rounding: Rounding,
) -> LaunchpadResult<u128> {
    if denominator == 0 {
        return Err(LaunchpadError::DivisionByZero);
    }

    let product = U256::mul_u128(a, b);
    let (quotient, remainder) = product
        .div_rem_u128(denominator)
        .ok_or(LaunchpadError::DivisionByZero)?;

    let mut result = quotient.to_u128().ok_or(LaunchpadError::MathOverflow)?;
    if rounding == Rounding::Up && remainder > 0 {
        result = result.checked_add(1).ok_or(LaunchpadError::MathOverflow)?;
    }
    Ok(result)
}

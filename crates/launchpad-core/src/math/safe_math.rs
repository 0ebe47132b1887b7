//! # Safe Math Operations
//!
//! Overflow-checked arithmetic for amounts, counters and balances.

use crate::constants::SCALE;
use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::math::big_int::{mul_div_u128, Rounding};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Division operations with zero check
    (div, $fn_name:ident, $type:ty) => {
        #[doc = concat!("Checked division on `", stringify!($type), "`")]
        pub fn $fn_name(a: $type, b: $type) -> LaunchpadResult<$type> {
            if b == 0 {
                return Err(LaunchpadError::DivisionByZero);
            }
            Ok(a / b)
        }
    };

    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        #[doc = concat!("Checked `", stringify!($checked_method), "` on `", stringify!($type), "`")]
        pub fn $fn_name(a: $type, b: $type) -> LaunchpadResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };
}

safe_arith!(safe_add_u64, u64, checked_add, LaunchpadError::MathOverflow);

safe_arith!(safe_add_u128, u128, checked_add, LaunchpadError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, LaunchpadError::MathUnderflow);
safe_arith!(safe_mul_u128, u128, checked_mul, LaunchpadError::MathOverflow);
safe_arith!(div, safe_div_u128, u128);

/// Multiply a per-whole-token price by a scaled unit amount, rounding up
///
/// `price` is value per `SCALE` units. Rounding up means a fractional
/// purchase never costs less than its exact share.
pub fn scaled_cost(price: u128, units: u128) -> LaunchpadResult<u128> {
    mul_div_u128(price, units, SCALE, Rounding::Up)
}

/// Multiply two 18-decimal values, rounding down
pub fn scaled_mul(a: u128, b: u128) -> LaunchpadResult<u128> {
    mul_div_u128(a, b, SCALE, Rounding::Down)
}

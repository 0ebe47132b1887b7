//! Decimal text <-> scaled integer conversion for the call boundary.

use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::math::safe_math::{safe_add_u128, safe_mul_u128};

fn pow10(decimals: u8) -> LaunchpadResult<u128> {
    10u128
        .checked_pow(decimals as u32)
        .ok_or(LaunchpadError::InvalidDecimal("too many decimals"))
}

/// Parse a human decimal such as `"0.01"` into a scaled integer
pub fn parse_units(text: &str, decimals: u8) -> LaunchpadResult<u128> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LaunchpadError::InvalidDecimal("empty"));
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(LaunchpadError::InvalidDecimal("no digits"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LaunchpadError::InvalidDecimal("non-digit character"));
    }
    if fraction.len() > decimals as usize {
        return Err(LaunchpadError::InvalidDecimal("too many fractional digits"));
    }

    let scale = pow10(decimals)?;
    let mut whole_value: u128 = 0;
    for digit in whole.bytes() {
        whole_value = safe_add_u128(safe_mul_u128(whole_value, 10)?, (digit - b'0') as u128)?;
    }

    let mut fraction_value: u128 = 0;
    for digit in fraction.bytes() {
        fraction_value = fraction_value * 10 + (digit - b'0') as u128;
    }
    let padding = pow10(decimals - fraction.len() as u8)?;

    safe_add_u128(safe_mul_u128(whole_value, scale)?, fraction_value * padding)
}

/// Render a scaled integer as a decimal string, e.g. `10^16` -> `"0.01"`
///
/// Whole values keep one fractional digit (`"1.0"`).
pub fn format_units(value: u128, decimals: u8) -> String {
    let Ok(scale) = pow10(decimals) else {
        return value.to_string();
    };
    if decimals == 0 {
        return value.to_string();
    }

    let whole = value / scale;
    let fraction = value % scale;
    let digits = format!("{:0width$}", fraction, width = decimals as usize);
    let trimmed = digits.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DECIMALS, SCALE};

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("0.01", DECIMALS).unwrap(), SCALE / 100);
        assert_eq!(parse_units("10000", DECIMALS).unwrap(), 10_000 * SCALE);
        assert_eq!(parse_units("0.0002", DECIMALS).unwrap(), 2 * SCALE / 10_000);
        assert_eq!(parse_units(".5", DECIMALS).unwrap(), SCALE / 2);
        assert_eq!(parse_units("3.", DECIMALS).unwrap(), 3 * SCALE);
        assert_eq!(parse_units(" 1 ", DECIMALS).unwrap(), SCALE);
        assert_eq!(parse_units("0.000000000000000001", DECIMALS).unwrap(), 1);
    }

    #[test]
    fn test_parse_units_rejects() {
        assert!(parse_units("", DECIMALS).is_err());
        assert!(parse_units(".", DECIMALS).is_err());
        assert!(parse_units("-1", DECIMALS).is_err());
        assert!(parse_units("1.2.3", DECIMALS).is_err());
        assert!(parse_units("1e18", DECIMALS).is_err());
        assert!(parse_units("0.0000000000000000001", DECIMALS).is_err());
        assert!(parse_units("999999999999999999999999999999999999999", DECIMALS).is_err());
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(SCALE / 100, DECIMALS), "0.01");
        assert_eq!(format_units(SCALE, DECIMALS), "1.0");
        assert_eq!(format_units(980_000 * SCALE, DECIMALS), "980000.0");
        assert_eq!(format_units(0, DECIMALS), "0.0");
        assert_eq!(format_units(1, DECIMALS), "0.000000000000000001");
        assert_eq!(format_units(42, 0), "42");
    }
}

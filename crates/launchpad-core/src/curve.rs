//! # Pricing Curve
//!
//! Maps cumulative units sold to the price of one whole token for the next
//! purchase. Every shape is O(1) and non-decreasing in `sold`, so a later
//! buyer never pays less per unit than an earlier one at the same position.
//!
//! A purchase is priced flat: `units` bought at `sold` cost
//! `cost(sold) * units / SCALE`, with no per-unit integration across the batch.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CURVE_FLOOR, DEFAULT_CURVE_INCREMENT, DEFAULT_CURVE_STEP};
use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::math::safe_math::{safe_add_u128, safe_div_u128, safe_mul_u128, scaled_cost, scaled_mul};

/// Configurable curve shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingCurve {
    /// `floor + step * (sold / increment)` with integer division
    Step {
        floor: u128,
        step: u128,
        increment: u128,
    },
    /// `base + slope * sold / SCALE`, rounded down
    Linear { base: u128, slope: u128 },
}

impl Default for PricingCurve {
    fn default() -> Self {
        Self::Step {
            floor: DEFAULT_CURVE_FLOOR,
            step: DEFAULT_CURVE_STEP,
            increment: DEFAULT_CURVE_INCREMENT,
        }
    }
}

impl PricingCurve {
    /// Price of one whole token once `sold` units are gone
    pub fn cost(&self, sold: u128) -> LaunchpadResult<u128> {
        match *self {
            Self::Step { floor, step, increment } => {
                let steps = safe_div_u128(sold, increment)?;
                safe_add_u128(floor, safe_mul_u128(step, steps)?)
            }
            Self::Linear { base, slope } => safe_add_u128(base, scaled_mul(slope, sold)?),
        }
    }

    /// Total value owed for `units` bought at cumulative position `sold`
    pub fn total_cost(&self, sold: u128, units: u128) -> LaunchpadResult<u128> {
        scaled_cost(self.cost(sold)?, units)
    }

    /// Reject shapes that cannot price every position up to `max_sold`
    pub fn validate(&self, max_sold: u128) -> LaunchpadResult<()> {
        if let Self::Step { increment, .. } = self {
            if *increment == 0 {
                return Err(LaunchpadError::InvalidConfig("curve increment must be positive"));
            }
        }
        if self.cost(0)? == 0 {
            return Err(LaunchpadError::InvalidConfig("curve price must be positive at zero sold"));
        }
        // The curve is non-decreasing, so the last position bounds every price
        self.cost(max_sold)
            .map(|_| ())
            .map_err(|_| LaunchpadError::InvalidConfig("curve overflows within supply"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCALE;

    #[test]
    fn test_default_step_prices() {
        let curve = PricingCurve::default();
        assert_eq!(curve.cost(0).unwrap(), SCALE / 10_000);
        assert_eq!(curve.cost(10_000 * SCALE - 1).unwrap(), SCALE / 10_000);
        assert_eq!(curve.cost(10_000 * SCALE).unwrap(), 2 * SCALE / 10_000);
        assert_eq!(curve.cost(20_000 * SCALE).unwrap(), 3 * SCALE / 10_000);
    }

    #[test]
    fn test_batch_is_priced_flat() {
        let curve = PricingCurve::default();
        // 10,000 tokens at position 0 cost 1.0 even though the batch crosses into the next step
        assert_eq!(curve.total_cost(0, 10_000 * SCALE).unwrap(), SCALE);
        assert_eq!(curve.total_cost(5_000 * SCALE, 10_000 * SCALE).unwrap(), SCALE);
        assert_eq!(curve.total_cost(10_000 * SCALE, 10_000 * SCALE).unwrap(), 2 * SCALE);
    }

    #[test]
    fn test_linear_prices() {
        let curve = PricingCurve::Linear { base: SCALE / 1_000, slope: SCALE / 1_000_000 };
        assert_eq!(curve.cost(0).unwrap(), SCALE / 1_000);
        // After 1,000 tokens the price has doubled
        assert_eq!(curve.cost(1_000 * SCALE).unwrap(), 2 * SCALE / 1_000);
    }

    #[test]
    fn test_validate() {
        let bad = PricingCurve::Step { floor: 1, step: 1, increment: 0 };
        assert!(matches!(bad.validate(SCALE), Err(LaunchpadError::InvalidConfig(_))));

        let overflowing = PricingCurve::Step { floor: 1, step: u128::MAX, increment: 1 };
        assert!(overflowing.validate(2).is_err());

        let free_step = PricingCurve::Step { floor: 0, step: 0, increment: 1 };
        assert!(matches!(free_step.validate(SCALE), Err(LaunchpadError::InvalidConfig(_))));
        let free_linear = PricingCurve::Linear { base: 0, slope: 0 };
        assert!(free_linear.validate(SCALE).is_err());
        assert!(PricingCurve::Linear { base: 1, slope: 0 }.validate(SCALE).is_ok());

        assert!(PricingCurve::default().validate(1_000_000 * SCALE).is_ok());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&PricingCurve::Linear { base: 1, slope: 2 }).unwrap();
        assert_eq!(json, r#"{"linear":{"base":1,"slope":2}}"#);
        let back: PricingCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PricingCurve::Linear { base: 1, slope: 2 });
    }
}

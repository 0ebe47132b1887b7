//! # Fixed-Point Math
//!
//! Checked arithmetic for 18-decimal amounts.

pub mod big_int;
pub mod safe_math;
pub mod units;

// Re-export commonly used functions
pub use big_int::*;
pub use safe_math::*;

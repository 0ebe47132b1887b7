//! # Launchpad Constants
//!
//! Fixed-point scale and the default sale parameters:
//! - Decimal scaling shared by value and token amounts
//! - Supply, sale thresholds and creation fee
//! - Default step-curve parameters
//! - Per-purchase bounds and metadata limits

// ============================================================================
// Fixed-Point Constants
// ============================================================================

/// Decimal places used for every value and token amount
pub const DECIMALS: u8 = 18;

/// Fixed-point scale factor: 10^18 (one whole token, one whole native coin)
pub const SCALE: u128 = 1_000_000_000_000_000_000;

// ============================================================================
// Sale Parameters
// ============================================================================

/// Supply minted to the reserve of every launched token (1,000,000 tokens)
pub const DEFAULT_TOTAL_SUPPLY: u128 = 1_000_000 * SCALE;

/// Units sold after which a sale closes (500,000 tokens)
pub const DEFAULT_TOKEN_LIMIT: u128 = 500_000 * SCALE;

/// Native value raised after which a sale closes (3.0)
pub const DEFAULT_TARGET: u128 = 3 * SCALE;

/// Fee charged for launching a sale (0.01)
pub const DEFAULT_CREATION_FEE: u128 = SCALE / 100;

// ============================================================================
// Pricing Curve Defaults
// ============================================================================

/// Unit price before anything is sold (0.0001)
pub const DEFAULT_CURVE_FLOOR: u128 = SCALE / 10_000;

/// Price increase per completed increment (0.0001)
pub const DEFAULT_CURVE_STEP: u128 = SCALE / 10_000;

/// Units sold per price step (10,000 tokens)
pub const DEFAULT_CURVE_INCREMENT: u128 = 10_000 * SCALE;

// ============================================================================
// Purchase Bounds
// ============================================================================

/// Smallest purchase accepted by default (1 token)
pub const DEFAULT_MIN_PURCHASE: u128 = SCALE;

/// Largest single purchase accepted by default (10,000 tokens)
pub const DEFAULT_MAX_PURCHASE: u128 = 10_000 * SCALE;

// ============================================================================
// Token Metadata Limits
// ============================================================================

/// Maximum token name length in bytes
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum ticker length in bytes
pub const MAX_TICKER_LENGTH: usize = 12;

// ============================================================================
// Address Derivation Seeds
// ============================================================================

/// Seed prefix for token identities derived under the registry
pub const TOKEN_SEED: &[u8] = b"token";

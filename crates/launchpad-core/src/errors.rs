//! # Launchpad Error Types
//!
//! Every rejected call maps to exactly one variant here. A call that returns
//! an error has left the registry untouched.

use solana_program::pubkey::Pubkey;
use thiserror::Error;

use crate::sale::SaleId;

/// Errors raised by the sale engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchpadError {
    // ========================================================================
    // Sale Lifecycle Errors
    // ========================================================================

    #[error("Creation fee mismatch: expected {expected}, paid {paid}")]
    InvalidFee { expected: u128, paid: u128 },

    #[error("Unknown sale: {0}")]
    UnknownSale(SaleId),

    #[error("Unknown token: {0}")]
    UnknownToken(Pubkey),

    #[error("Sale {0} is not open")]
    SaleNotOpen(SaleId),

    #[error("Sale {0} is still open, target not reached")]
    SaleStillOpen(SaleId),

    #[error("Sale {0} is already finalized")]
    AlreadyFinalized(SaleId),

    // ========================================================================
    // Payment and Balance Errors
    // ========================================================================

    #[error("Insufficient payment: required {required}, paid {paid}")]
    InsufficientPayment { required: u128, paid: u128 },

    #[error("Insufficient reserve: available {available}, requested {requested}")]
    InsufficientReserve { available: u128, requested: u128 },

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: u128, requested: u128 },

    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: u128, requested: u128 },

    #[error("Purchase of {requested} outside bounds [{min}, {max}]")]
    PurchaseOutOfBounds { min: u128, max: u128, requested: u128 },

    #[error("Operation does not accept value, received {0}")]
    NonPayable(u128),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid token metadata: {0}")]
    InvalidMetadata(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("Invalid decimal amount: {0}")]
    InvalidDecimal(&'static str),

    #[error("Reserve already minted")]
    AlreadyMinted,

    #[error("Conservation invariant violated: balances {balances}, supply {supply}")]
    ConservationViolated { balances: u128, supply: u128 },

    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    // ========================================================================
    // Host Errors
    // ========================================================================

    #[error("Registry state lock poisoned")]
    StatePoisoned,
}

/// Result type using launchpad errors
pub type LaunchpadResult<T> = Result<T, LaunchpadError>;

impl LaunchpadError {
    /// Whether the error rejects the caller rather than the call's arguments
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Whether resubmitting the same call with more value could succeed
    pub fn is_underpayment(&self) -> bool {
        match self {
            Self::InsufficientPayment { .. } => true,
            // Fees must match exactly, so only a short fee can be fixed by paying more
            Self::InvalidFee { expected, paid } => paid < expected,
            _ => false,
        }
    }
}

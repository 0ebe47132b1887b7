//! # Launchpad Core - Bonding-Curve Sale Engine
//!
//! This crate contains the accounting state machine behind the launchpad:
//!
//! - A pricing curve mapping cumulative units sold to the next unit price
//! - One fungible-balance ledger per launched token
//! - Sale records with the `Open -> Closed -> Finalized` lifecycle
//! - The registry that owns every sale plus the fee vault
//! - A closed, serde-tagged request surface for hosts and tooling
//!
//! All quantities are `u128` fixed-point integers with 18 decimals.
//! Every public operation either applies all of its effects or none.

pub mod constants;
pub mod curve;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod math;
pub mod registry;
pub mod request;
pub mod sale;
pub mod serde_helpers;
pub mod shared;
pub mod validate;
pub mod vault;

// Re-export commonly used items
pub use constants::*;
pub use curve::PricingCurve;
pub use errors::{LaunchpadError, LaunchpadResult};
pub use events::RegistryEvent;
pub use ledger::TokenLedger;
pub use math::units::{format_units, parse_units};
pub use registry::{BuyReceipt, DepositReceipt, Payout, RegistryConfig, SaleRegistry};
pub use request::{Call, Request, Response};
pub use sale::{CloseThresholds, SaleId, SaleRecord, SaleStatus, SaleView};
pub use shared::SharedRegistry;
pub use solana_program::pubkey::Pubkey;
pub use vault::FeeVault;

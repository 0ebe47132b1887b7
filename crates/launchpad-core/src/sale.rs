//! # Sale Records
//!
//! Per-sale state and the `Open -> Closed -> Finalized` lifecycle.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::math::safe_math::safe_add_u128;
use crate::serde_helpers::pubkey_string;

/// Sequential sale identifier
pub type SaleId = u64;

/// Lifecycle status of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Accepting purchases
    Open,
    /// Threshold reached, waiting for the creator's deposit
    Closed,
    /// Remaining reserve handed to the creator
    Finalized,
}

/// Conditions under which a purchase closes a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseThresholds {
    pub total_supply: u128,
    pub token_limit: u128,
    pub target: u128,
    pub min_purchase: u128,
}

impl CloseThresholds {
    /// True once `sold` hits the limit, `raised` hits the target, or the
    /// remaining reserve can no longer fill a minimum purchase
    pub fn reached(&self, sold: u128, raised: u128) -> bool {
        let remaining = self.total_supply.saturating_sub(sold);
        sold >= self.token_limit || raised >= self.target || remaining < self.min_purchase
    }
}

/// State of a single sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub sale_id: SaleId,
    #[serde(with = "pubkey_string")]
    pub token: Pubkey,
    #[serde(with = "pubkey_string")]
    pub creator: Pubkey,
    pub name: String,
    pub ticker: String,
    sold: u128,
    raised: u128,
    status: SaleStatus,
}

impl SaleRecord {
    pub fn new(sale_id: SaleId, token: Pubkey, creator: Pubkey, name: String, ticker: String) -> Self {
        Self {
            sale_id,
            token,
            creator,
            name,
            ticker,
            sold: 0,
            raised: 0,
            status: SaleStatus::Open,
        }
    }

    pub fn sold(&self) -> u128 {
        self.sold
    }

    pub fn raised(&self) -> u128 {
        self.raised
    }

    pub fn status(&self) -> SaleStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == SaleStatus::Open
    }

    /// Counters after a purchase of `units` costing `cost`, without applying them
    pub fn after_purchase(&self, units: u128, cost: u128) -> LaunchpadResult<(u128, u128)> {
        if !self.is_open() {
            return Err(LaunchpadError::SaleNotOpen(self.sale_id));
        }
        Ok((safe_add_u128(self.sold, units)?, safe_add_u128(self.raised, cost)?))
    }

    /// Commit counters computed by `after_purchase`; returns true when the sale closed
    pub(crate) fn apply_purchase(&mut self, sold: u128, raised: u128, close: &CloseThresholds) -> bool {
        debug_assert!(sold >= self.sold && raised >= self.raised);
        self.sold = sold;
        self.raised = raised;
        if close.reached(sold, raised) {
            self.status = SaleStatus::Closed;
            return true;
        }
        false
    }

    /// Check that `caller` may finalize this sale now
    pub fn check_finalize(&self, caller: &Pubkey) -> LaunchpadResult<()> {
        match self.status {
            SaleStatus::Open => Err(LaunchpadError::SaleStillOpen(self.sale_id)),
            SaleStatus::Finalized => Err(LaunchpadError::AlreadyFinalized(self.sale_id)),
            SaleStatus::Closed if *caller != self.creator => {
                Err(LaunchpadError::Unauthorized("only the sale creator can deposit"))
            }
            SaleStatus::Closed => Ok(()),
        }
    }

    pub(crate) fn finalize(&mut self) {
        debug_assert_eq!(self.status, SaleStatus::Closed);
        self.status = SaleStatus::Finalized;
    }

    /// Read-only snapshot for listings
    pub fn view(&self) -> SaleView {
        SaleView {
            sale_id: self.sale_id,
            token: self.token,
            name: self.name.clone(),
            ticker: self.ticker.clone(),
            creator: self.creator,
            sold: self.sold,
            raised: self.raised,
            status: self.status,
            is_open: self.is_open(),
        }
    }
}

/// What a listing shows for one sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleView {
    pub sale_id: SaleId,
    #[serde(with = "pubkey_string")]
    pub token: Pubkey,
    pub name: String,
    pub ticker: String,
    #[serde(with = "pubkey_string")]
    pub creator: Pubkey,
    pub sold: u128,
    pub raised: u128,
    pub status: SaleStatus,
    pub is_open: bool,
}

//! # Token Ledger
//!
//! Fungible balances for one launched token. The whole supply is minted once
//! into the custodian's reserve; afterwards units only move between holders,
//! so `sum(balances) == total_supply` holds at every observable point.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::constants::DECIMALS;
use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::math::safe_math::{safe_add_u128, safe_sub_u128};
use crate::serde_helpers::{pubkey_map, pubkey_string};

/// Balance sheet of a single sale's token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Token identity
    #[serde(with = "pubkey_string")]
    pub token: Pubkey,
    /// Holder of the unsold reserve (the registry itself)
    #[serde(with = "pubkey_string")]
    pub custodian: Pubkey,
    pub name: String,
    pub ticker: String,
    pub decimals: u8,
    total_supply: u128,
    #[serde(with = "pubkey_map")]
    balances: BTreeMap<Pubkey, u128>,
}

impl TokenLedger {
    /// Create an empty ledger; nothing exists until `mint_reserve`
    pub fn new(token: Pubkey, custodian: Pubkey, name: String, ticker: String) -> Self {
        Self {
            token,
            custodian,
            name,
            ticker,
            decimals: DECIMALS,
            total_supply: 0,
            balances: BTreeMap::new(),
        }
    }

    /// Credit the full supply to the custodian. Allowed exactly once.
    pub fn mint_reserve(&mut self, supply: u128) -> LaunchpadResult<()> {
        if self.total_supply != 0 {
            return Err(LaunchpadError::AlreadyMinted);
        }
        if supply == 0 {
            return Err(LaunchpadError::InvalidAmount);
        }
        self.total_supply = supply;
        self.balances.insert(self.custodian, supply);
        Ok(())
    }

    /// Move `amount` from `from` to `to` as one debit+credit
    pub fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: u128) -> LaunchpadResult<()> {
        let available = self.balance_of(from);
        if amount > available {
            return Err(LaunchpadError::InsufficientBalance { available, requested: amount });
        }
        if from == to || amount == 0 {
            return Ok(());
        }

        // Both sides are computed before either is written
        let debited = safe_sub_u128(available, amount)?;
        let credited = safe_add_u128(self.balance_of(to), amount)?;

        if debited == 0 {
            self.balances.remove(from);
        } else {
            self.balances.insert(*from, debited);
        }
        self.balances.insert(*to, credited);
        Ok(())
    }

    /// Balance of `holder`, zero when unknown
    pub fn balance_of(&self, holder: &Pubkey) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Units still held by the custodian
    pub fn reserve(&self) -> u128 {
        self.balance_of(&self.custodian)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Holders with a non-zero balance, in key order
    pub fn holders(&self) -> impl Iterator<Item = (&Pubkey, &u128)> {
        self.balances.iter()
    }

    /// Sum of every balance
    pub fn circulating(&self) -> LaunchpadResult<u128> {
        self.balances
            .values()
            .try_fold(0u128, |sum, balance| safe_add_u128(sum, *balance))
    }

    /// Check `sum(balances) == total_supply`
    pub fn verify_conservation(&self) -> LaunchpadResult<()> {
        let balances = self.circulating()?;
        if balances != self.total_supply {
            return Err(LaunchpadError::ConservationViolated {
                balances,
                supply: self.total_supply,
            });
        }
        Ok(())
    }
}

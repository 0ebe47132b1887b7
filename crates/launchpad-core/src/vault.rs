//! # Fee Vault
//!
//! Native value held by the registry: creation fees plus purchase proceeds,
//! released only by owner withdrawal.

use serde::{Deserialize, Serialize};

use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::math::safe_math::{safe_add_u128, safe_sub_u128};

/// Accumulated value owed to the registry owner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeVault {
    balance: u128,
    fees_collected: u128,
    proceeds_collected: u128,
    withdrawn: u128,
}

impl FeeVault {
    pub fn balance(&self) -> u128 {
        self.balance
    }

    pub fn fees_collected(&self) -> u128 {
        self.fees_collected
    }

    pub fn proceeds_collected(&self) -> u128 {
        self.proceeds_collected
    }

    pub fn withdrawn(&self) -> u128 {
        self.withdrawn
    }

    /// Vault after a creation fee, without applying it
    pub fn with_fee(&self, amount: u128) -> LaunchpadResult<Self> {
        Ok(Self {
            balance: safe_add_u128(self.balance, amount)?,
            fees_collected: safe_add_u128(self.fees_collected, amount)?,
            ..self.clone()
        })
    }

    /// Vault after purchase proceeds, without applying them
    pub fn with_proceeds(&self, amount: u128) -> LaunchpadResult<Self> {
        Ok(Self {
            balance: safe_add_u128(self.balance, amount)?,
            proceeds_collected: safe_add_u128(self.proceeds_collected, amount)?,
            ..self.clone()
        })
    }

    /// Vault after releasing `amount`, without applying it
    pub fn with_withdrawal(&self, amount: u128) -> LaunchpadResult<Self> {
        if amount > self.balance {
            return Err(LaunchpadError::InsufficientFunds {
                available: self.balance,
                requested: amount,
            });
        }
        Ok(Self {
            balance: safe_sub_u128(self.balance, amount)?,
            withdrawn: safe_add_u128(self.withdrawn, amount)?,
            ..self.clone()
        })
    }

    /// `balance == fees + proceeds - withdrawn`
    pub fn is_consistent(&self) -> bool {
        self.fees_collected
            .checked_add(self.proceeds_collected)
            .and_then(|inflow| inflow.checked_sub(self.withdrawn))
            == Some(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflows_and_withdrawal() {
        let vault = FeeVault::default().with_fee(10).unwrap().with_proceeds(100).unwrap();
        assert_eq!(vault.balance(), 110);
        assert!(vault.is_consistent());

        let vault = vault.with_withdrawal(110).unwrap();
        assert_eq!(vault.balance(), 0);
        assert_eq!(vault.withdrawn(), 110);
        assert!(vault.is_consistent());
    }

    #[test]
    fn test_overdraw_rejected() {
        let vault = FeeVault::default().with_fee(10).unwrap();
        assert_eq!(
            vault.with_withdrawal(11),
            Err(LaunchpadError::InsufficientFunds { available: 10, requested: 11 })
        );
        assert_eq!(vault.balance(), 10);
    }
}

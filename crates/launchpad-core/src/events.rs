//! Events recorded by successful registry calls, drained by the host.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::sale::SaleId;
use crate::serde_helpers::pubkey_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryEvent {
    Created {
        sale_id: SaleId,
        #[serde(with = "pubkey_string")]
        token: Pubkey,
        #[serde(with = "pubkey_string")]
        creator: Pubkey,
    },
    Bought {
        sale_id: SaleId,
        #[serde(with = "pubkey_string")]
        buyer: Pubkey,
        units: u128,
        cost: u128,
    },
    Closed {
        sale_id: SaleId,
        sold: u128,
        raised: u128,
    },
    Finalized {
        sale_id: SaleId,
        #[serde(with = "pubkey_string")]
        creator: Pubkey,
        units: u128,
    },
    Withdrawn {
        #[serde(with = "pubkey_string")]
        owner: Pubkey,
        amount: u128,
    },
}

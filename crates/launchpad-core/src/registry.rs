//! # Sale Registry
//!
//! Owns every sale (record + ledger) and the fee vault, and exposes the
//! launchpad's operations. Caller identity and attached value are explicit
//! arguments of each call.
//!
//! Each mutating operation runs in two phases: every check and every new
//! value is computed against the current state first, then the results are
//! written. A call that returns `Err` has changed nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use tracing::{debug, info};

use crate::constants::*;
use crate::curve::PricingCurve;
use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::events::RegistryEvent;
use crate::ledger::TokenLedger;
use crate::math::safe_math::{safe_add_u128, safe_add_u64, safe_mul_u128, safe_sub_u128, scaled_cost};
use crate::sale::{CloseThresholds, SaleId, SaleRecord, SaleStatus, SaleView};
use crate::serde_helpers::{pubkey_map, pubkey_string};
use crate::validate::validate_token;
use crate::vault::FeeVault;

// ============================================================================
// Configuration
// ============================================================================

/// Registry-wide parameters, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Exact value required to launch a sale
    pub creation_fee: u128,
    /// Supply minted to every new token's reserve
    pub total_supply: u128,
    /// Units sold at which a sale closes
    pub token_limit: u128,
    /// Value raised at which a sale closes
    pub target: u128,
    /// Unit price as a function of units sold
    pub curve: PricingCurve,
    /// Smallest accepted purchase
    pub min_purchase: u128,
    /// Largest accepted single purchase
    pub max_purchase: u128,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            creation_fee: DEFAULT_CREATION_FEE,
            total_supply: DEFAULT_TOTAL_SUPPLY,
            token_limit: DEFAULT_TOKEN_LIMIT,
            target: DEFAULT_TARGET,
            curve: PricingCurve::default(),
            min_purchase: DEFAULT_MIN_PURCHASE,
            max_purchase: DEFAULT_MAX_PURCHASE,
        }
    }
}

impl RegistryConfig {
    /// Validate configuration
    pub fn validate(&self) -> LaunchpadResult<()> {
        if self.total_supply == 0 {
            return Err(LaunchpadError::InvalidConfig("total_supply must be positive"));
        }
        if self.token_limit == 0 || self.token_limit > self.total_supply {
            return Err(LaunchpadError::InvalidConfig("token_limit must be within total_supply"));
        }
        if self.target == 0 {
            return Err(LaunchpadError::InvalidConfig("target must be positive"));
        }
        if self.min_purchase == 0 || self.min_purchase > self.max_purchase {
            return Err(LaunchpadError::InvalidConfig("purchase bounds must satisfy 0 < min <= max"));
        }
        if self.min_purchase > self.total_supply {
            return Err(LaunchpadError::InvalidConfig("min_purchase must be within total_supply"));
        }
        self.curve.validate(self.total_supply)?;

        // The dearest possible purchase must still be priceable
        self.curve
            .total_cost(self.total_supply, self.max_purchase)
            .map(|_| ())
            .map_err(|_| LaunchpadError::InvalidConfig("max purchase cost overflows"))
    }

    pub fn close_thresholds(&self) -> CloseThresholds {
        CloseThresholds {
            total_supply: self.total_supply,
            token_limit: self.token_limit,
            target: self.target,
            min_purchase: self.min_purchase,
        }
    }
}

// ============================================================================
// Receipts
// ============================================================================

/// Outcome of a successful purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyReceipt {
    pub sale_id: SaleId,
    #[serde(with = "pubkey_string")]
    pub buyer: Pubkey,
    pub units: u128,
    /// Price per whole token the batch was charged at
    pub unit_price: u128,
    pub total_cost: u128,
    /// Value paid beyond `total_cost`, returned to the buyer
    pub refund: u128,
    /// Whether this purchase closed the sale
    pub closed: bool,
}

/// Outcome of a successful deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub sale_id: SaleId,
    #[serde(with = "pubkey_string")]
    pub creator: Pubkey,
    /// Unsold units handed to the creator
    pub units: u128,
}

/// Native value released to the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    #[serde(with = "pubkey_string")]
    pub recipient: Pubkey,
    pub amount: u128,
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Sale {
    record: SaleRecord,
    ledger: TokenLedger,
}

/// The launchpad's authoritative state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRegistry {
    #[serde(with = "pubkey_string")]
    owner: Pubkey,
    /// Identity of the registry itself; custodian of every reserve
    #[serde(with = "pubkey_string")]
    registry_id: Pubkey,
    config: RegistryConfig,
    vault: FeeVault,
    sales: Vec<Sale>,
    #[serde(with = "pubkey_map")]
    token_index: BTreeMap<Pubkey, SaleId>,
    #[serde(skip)]
    events: Vec<RegistryEvent>,
}

impl SaleRegistry {
    /// Create an empty registry owned by `owner`
    pub fn new(owner: Pubkey, registry_id: Pubkey, config: RegistryConfig) -> LaunchpadResult<Self> {
        config.validate()?;
        if owner == registry_id {
            return Err(LaunchpadError::InvalidConfig("owner must differ from the registry identity"));
        }
        info!(%owner, %registry_id, fee = config.creation_fee, "registry initialized");
        Ok(Self {
            owner,
            registry_id,
            config,
            vault: FeeVault::default(),
            sales: Vec::new(),
            token_index: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    // ------------------------------------------------------------------------
    // Mutating operations
    // ------------------------------------------------------------------------

    /// Launch a new sale, paying exactly the creation fee
    pub fn create(&mut self, caller: &Pubkey, name: &str, ticker: &str, fee_paid: u128) -> LaunchpadResult<SaleId> {
        self.ensure_external(caller)?;
        if fee_paid != self.config.creation_fee {
            return Err(LaunchpadError::InvalidFee {
                expected: self.config.creation_fee,
                paid: fee_paid,
            });
        }
        validate_token(name, ticker)?;

        let sale_id = self.total_sales();
        safe_add_u64(sale_id, 1)?;
        let token = self.derive_token(sale_id);
        let vault = self.vault.with_fee(fee_paid)?;

        let mut ledger = TokenLedger::new(token, self.registry_id, name.to_string(), ticker.to_string());
        ledger.mint_reserve(self.config.total_supply)?;
        let record = SaleRecord::new(sale_id, token, *caller, name.to_string(), ticker.to_string());

        self.vault = vault;
        self.sales.push(Sale { record, ledger });
        self.token_index.insert(token, sale_id);
        self.events.push(RegistryEvent::Created { sale_id, token, creator: *caller });

        info!(sale_id, %token, creator = %caller, name, ticker, "sale created");
        Ok(sale_id)
    }

    /// Buy `units` from an open sale at the current curve price
    pub fn buy(&mut self, caller: &Pubkey, sale_id: SaleId, units: u128, value_paid: u128) -> LaunchpadResult<BuyReceipt> {
        self.ensure_external(caller)?;
        let index = self.sale_index(sale_id)?;
        let sale = &self.sales[index];

        if !sale.record.is_open() {
            return Err(LaunchpadError::SaleNotOpen(sale_id));
        }
        if units == 0 {
            return Err(LaunchpadError::InvalidAmount);
        }
        if units < self.config.min_purchase || units > self.config.max_purchase {
            return Err(LaunchpadError::PurchaseOutOfBounds {
                min: self.config.min_purchase,
                max: self.config.max_purchase,
                requested: units,
            });
        }
        let available = sale.ledger.reserve();
        if units > available {
            return Err(LaunchpadError::InsufficientReserve { available, requested: units });
        }

        let unit_price = self.config.curve.cost(sale.record.sold())?;
        let total_cost = scaled_cost(unit_price, units)?;
        if value_paid < total_cost {
            return Err(LaunchpadError::InsufficientPayment {
                required: total_cost,
                paid: value_paid,
            });
        }
        let refund = safe_sub_u128(value_paid, total_cost)?;
        let (sold, raised) = sale.record.after_purchase(units, total_cost)?;
        let vault = self.vault.with_proceeds(total_cost)?;

        // Commit
        let close = self.config.close_thresholds();
        let registry_id = self.registry_id;
        let sale = &mut self.sales[index];
        sale.ledger.transfer(&registry_id, caller, units)?;
        let closed = sale.record.apply_purchase(sold, raised, &close);
        self.vault = vault;

        self.events.push(RegistryEvent::Bought {
            sale_id,
            buyer: *caller,
            units,
            cost: total_cost,
        });
        debug!(sale_id, buyer = %caller, units, total_cost, refund, "purchase settled");
        if closed {
            self.events.push(RegistryEvent::Closed { sale_id, sold, raised });
            info!(sale_id, sold, raised, "sale closed");
        }

        Ok(BuyReceipt {
            sale_id,
            buyer: *caller,
            units,
            unit_price,
            total_cost,
            refund,
            closed,
        })
    }

    /// Hand the unsold reserve of a closed sale to its creator
    pub fn deposit(&mut self, caller: &Pubkey, sale_id: SaleId) -> LaunchpadResult<DepositReceipt> {
        let index = self.sale_index(sale_id)?;
        let registry_id = self.registry_id;
        let sale = &mut self.sales[index];
        sale.record.check_finalize(caller)?;

        let creator = sale.record.creator;
        let units = sale.ledger.reserve();
        sale.ledger.transfer(&registry_id, &creator, units)?;
        sale.record.finalize();

        self.events.push(RegistryEvent::Finalized { sale_id, creator, units });
        info!(sale_id, %creator, units, "sale finalized");
        Ok(DepositReceipt { sale_id, creator, units })
    }

    /// Release `amount` of accumulated value to the owner
    pub fn withdraw(&mut self, caller: &Pubkey, amount: u128) -> LaunchpadResult<Payout> {
        if *caller != self.owner {
            return Err(LaunchpadError::Unauthorized("only the registry owner can withdraw"));
        }
        if amount == 0 {
            return Err(LaunchpadError::InvalidAmount);
        }
        self.vault = self.vault.with_withdrawal(amount)?;

        self.events.push(RegistryEvent::Withdrawn { owner: self.owner, amount });
        info!(owner = %self.owner, amount, remaining = self.vault.balance(), "vault withdrawal");
        Ok(Payout { recipient: self.owner, amount })
    }

    // ------------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------------

    pub fn fee(&self) -> u128 {
        self.config.creation_fee
    }

    pub fn total_sales(&self) -> u64 {
        self.sales.len() as u64
    }

    pub fn target(&self) -> u128 {
        self.config.target
    }

    pub fn token_limit(&self) -> u128 {
        self.config.token_limit
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    pub fn registry_id(&self) -> &Pubkey {
        &self.registry_id
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn vault(&self) -> &FeeVault {
        &self.vault
    }

    /// Unit price at cumulative position `sold`
    pub fn get_cost(&self, sold: u128) -> LaunchpadResult<u128> {
        self.config.curve.cost(sold)
    }

    /// What buying `units` from `sale_id` would cost right now
    pub fn quote(&self, sale_id: SaleId, units: u128) -> LaunchpadResult<u128> {
        let record = self.record(sale_id)?;
        self.config.curve.total_cost(record.sold(), units)
    }

    pub fn get_sale(&self, sale_id: SaleId) -> LaunchpadResult<SaleView> {
        self.record(sale_id).map(SaleRecord::view)
    }

    pub fn sale_by_token(&self, token: &Pubkey) -> LaunchpadResult<SaleView> {
        let sale_id = self
            .token_index
            .get(token)
            .copied()
            .ok_or(LaunchpadError::UnknownToken(*token))?;
        self.get_sale(sale_id)
    }

    /// Every sale in creation order
    pub fn sales(&self) -> Vec<SaleView> {
        self.sales.iter().map(|sale| sale.record.view()).collect()
    }

    pub fn record(&self, sale_id: SaleId) -> LaunchpadResult<&SaleRecord> {
        self.sale_index(sale_id).map(|index| &self.sales[index].record)
    }

    pub fn ledger(&self, sale_id: SaleId) -> LaunchpadResult<&TokenLedger> {
        self.sale_index(sale_id).map(|index| &self.sales[index].ledger)
    }

    pub fn balance_of(&self, sale_id: SaleId, holder: &Pubkey) -> LaunchpadResult<u128> {
        self.ledger(sale_id).map(|ledger| ledger.balance_of(holder))
    }

    pub fn reserve_of(&self, sale_id: SaleId) -> LaunchpadResult<u128> {
        self.ledger(sale_id).map(TokenLedger::reserve)
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Re-check every cross-component invariant, e.g. after loading a snapshot
    pub fn check_invariants(&self) -> LaunchpadResult<()> {
        self.config.validate()?;
        if !self.vault.is_consistent() {
            return Err(LaunchpadError::InvalidConfig("vault totals do not match its balance"));
        }
        if self.token_index.len() != self.sales.len() {
            return Err(LaunchpadError::InvalidConfig("token index out of sync with sales"));
        }

        let close = self.config.close_thresholds();
        let mut raised_total = 0u128;
        for (index, sale) in self.sales.iter().enumerate() {
            let record = &sale.record;
            if record.sale_id != index as u64 || self.token_index.get(&record.token) != Some(&record.sale_id) {
                return Err(LaunchpadError::InvalidConfig("sale identifiers out of order"));
            }
            if sale.ledger.total_supply() != self.config.total_supply {
                return Err(LaunchpadError::InvalidConfig("ledger supply differs from config"));
            }
            sale.ledger.verify_conservation()?;

            let expected_reserve = match record.status() {
                SaleStatus::Finalized => 0,
                _ => safe_sub_u128(self.config.total_supply, record.sold())?,
            };
            if sale.ledger.reserve() != expected_reserve {
                return Err(LaunchpadError::ConservationViolated {
                    balances: sale.ledger.reserve(),
                    supply: expected_reserve,
                });
            }

            if close.reached(record.sold(), record.raised()) == record.is_open() {
                return Err(LaunchpadError::InvalidConfig("sale status disagrees with its thresholds"));
            }
            if record.status() == SaleStatus::Finalized {
                // The creator may also hold purchased units
                let unsold = safe_sub_u128(self.config.total_supply, record.sold())?;
                if sale.ledger.balance_of(&record.creator) < unsold {
                    return Err(LaunchpadError::InvalidConfig("finalized sale did not pay out its reserve"));
                }
            }
            raised_total = safe_add_u128(raised_total, record.raised())?;
        }

        if raised_total != self.vault.proceeds_collected() {
            return Err(LaunchpadError::InvalidConfig("sale proceeds differ from vault proceeds"));
        }
        let expected_fees = safe_mul_u128(self.config.creation_fee, self.sales.len() as u128)?;
        if self.vault.fees_collected() != expected_fees {
            return Err(LaunchpadError::InvalidConfig("vault fees differ from sales created"));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn sale_index(&self, sale_id: SaleId) -> LaunchpadResult<usize> {
        usize::try_from(sale_id)
            .ok()
            .filter(|index| *index < self.sales.len())
            .ok_or(LaunchpadError::UnknownSale(sale_id))
    }

    fn derive_token(&self, sale_id: SaleId) -> Pubkey {
        Pubkey::find_program_address(&[TOKEN_SEED, &sale_id.to_le_bytes()], &self.registry_id).0
    }

    fn ensure_external(&self, caller: &Pubkey) -> LaunchpadResult<()> {
        if *caller == self.registry_id {
            return Err(LaunchpadError::Unauthorized("the registry cannot call itself"));
        }
        Ok(())
    }
}

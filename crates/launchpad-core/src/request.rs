//! # Typed Call Surface
//!
//! The closed set of operations a host can route to the registry. A `Call`
//! bundles the request with the invoking principal and the native value
//! attached to it; only `create` and `buy` accept value.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use tracing::debug;

use crate::errors::{LaunchpadError, LaunchpadResult};
use crate::registry::{BuyReceipt, DepositReceipt, Payout, SaleRegistry};
use crate::sale::{SaleId, SaleView};
use crate::serde_helpers::pubkey_string;

/// One boundary operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    // Payable
    Create { name: String, ticker: String },
    Buy { sale_id: SaleId, units: u128 },

    // Restricted
    Deposit { sale_id: SaleId },
    Withdraw { amount: u128 },

    // Read-only
    Fee,
    TotalSales,
    GetSale { index: SaleId },
    GetCost { sold: u128 },
    Target,
    TokenLimit,
    Quote { sale_id: SaleId, units: u128 },
    BalanceOf {
        sale_id: SaleId,
        #[serde(with = "pubkey_string")]
        holder: Pubkey,
    },
}

impl Request {
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::Buy { .. })
    }

    pub fn is_read_only(&self) -> bool {
        !matches!(
            self,
            Self::Create { .. } | Self::Buy { .. } | Self::Deposit { .. } | Self::Withdraw { .. }
        )
    }

    /// Short operation name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Buy { .. } => "buy",
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Fee => "fee",
            Self::TotalSales => "total_sales",
            Self::GetSale { .. } => "get_sale",
            Self::GetCost { .. } => "get_cost",
            Self::Target => "target",
            Self::TokenLimit => "token_limit",
            Self::Quote { .. } => "quote",
            Self::BalanceOf { .. } => "balance_of",
        }
    }
}

/// A request plus the principal invoking it and the value attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    #[serde(with = "pubkey_string")]
    pub caller: Pubkey,
    #[serde(default)]
    pub value: u128,
    pub request: Request,
}

impl Call {
    pub fn new(caller: Pubkey, request: Request) -> Self {
        Self { caller, value: 0, request }
    }

    pub fn with_value(mut self, value: u128) -> Self {
        self.value = value;
        self
    }
}

/// Result payload of a successful call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Created {
        sale_id: SaleId,
        #[serde(with = "pubkey_string")]
        token: Pubkey,
    },
    Bought(BuyReceipt),
    Deposited(DepositReceipt),
    Withdrawn(Payout),
    Amount(u128),
    Count(u64),
    Sale(SaleView),
}

impl SaleRegistry {
    /// Route a typed call to the matching operation
    pub fn execute(&mut self, call: &Call) -> LaunchpadResult<Response> {
        let Call { caller, value, request } = call;
        if *value > 0 && !request.is_payable() {
            return Err(LaunchpadError::NonPayable(*value));
        }

        let result = match request {
            Request::Create { name, ticker } => self
                .create(caller, name, ticker, *value)
                .and_then(|sale_id| {
                    let token = self.record(sale_id)?.token;
                    Ok(Response::Created { sale_id, token })
                }),
            Request::Buy { sale_id, units } => self.buy(caller, *sale_id, *units, *value).map(Response::Bought),
            Request::Deposit { sale_id } => self.deposit(caller, *sale_id).map(Response::Deposited),
            Request::Withdraw { amount } => self.withdraw(caller, *amount).map(Response::Withdrawn),
            Request::Fee => Ok(Response::Amount(self.fee())),
            Request::TotalSales => Ok(Response::Count(self.total_sales())),
            Request::GetSale { index } => self.get_sale(*index).map(Response::Sale),
            Request::GetCost { sold } => self.get_cost(*sold).map(Response::Amount),
            Request::Target => Ok(Response::Amount(self.target())),
            Request::TokenLimit => Ok(Response::Amount(self.token_limit())),
            Request::Quote { sale_id, units } => self.quote(*sale_id, *units).map(Response::Amount),
            Request::BalanceOf { sale_id, holder } => self.balance_of(*sale_id, holder).map(Response::Amount),
        };

        if let Err(err) = &result {
            debug!(op = request.name(), %caller, value, error = %err, "call rejected");
        }
        result
    }
}

//! # Call Scripts
//!
//! A script is a JSON list of steps, each naming a caller, an optional
//! attached value and one registry operation. Amounts are decimal strings;
//! principals are actor aliases or base58 keys. A script is compiled into
//! engine `Call`s up front, so a malformed step fails before anything runs.
//!
//! ```json
//! { "steps": [
//!   { "caller": "creator", "value": "0.01", "call": { "create": { "name": "DAPP Uni", "ticker": "DAPP" } } },
//!   { "caller": "buyer", "value": "1", "call": { "buy": { "sale_id": 0, "units": "10000" } } }
//! ] }
//! ```

use std::fs;
use std::path::Path;

use launchpad_core::{
    parse_units, Call, LaunchpadError, RegistryEvent, Request, Response, SaleId, SaleRegistry, DECIMALS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::actors::ActorBook;
use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Step {
    /// Actor alias or base58 key
    pub caller: String,
    /// Native value attached to the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub call: ScriptCall,
}

/// Script-level mirror of `Request` with human-readable amounts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptCall {
    Create { name: String, ticker: String },
    Buy { sale_id: SaleId, units: String },
    Deposit { sale_id: SaleId },
    Withdraw { amount: String },
    Fee,
    TotalSales,
    GetSale { index: SaleId },
    GetCost { sold: String },
    Target,
    TokenLimit,
    Quote { sale_id: SaleId, units: String },
    BalanceOf { sale_id: SaleId, holder: String },
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("Failed to read script {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| CliError::InvalidScript(format!("{}: {}", path.display(), e)))
    }

    /// Resolve every step into an engine call
    pub fn compile(&self, actors: &ActorBook) -> CliResult<Vec<Call>> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                step.to_call(actors)
                    .map_err(|e| CliError::InvalidScript(format!("step {}: {}", index, e)))
            })
            .collect()
    }
}

impl Step {
    pub fn to_call(&self, actors: &ActorBook) -> CliResult<Call> {
        let caller = actors.resolve(&self.caller)?;
        let value = match &self.value {
            Some(text) => units("value", text)?,
            None => 0,
        };

        let request = match &self.call {
            ScriptCall::Create { name, ticker } => Request::Create {
                name: name.clone(),
                ticker: ticker.clone(),
            },
            ScriptCall::Buy { sale_id, units: amount } => Request::Buy {
                sale_id: *sale_id,
                units: units("units", amount)?,
            },
            ScriptCall::Deposit { sale_id } => Request::Deposit { sale_id: *sale_id },
            ScriptCall::Withdraw { amount } => Request::Withdraw {
                amount: units("amount", amount)?,
            },
            ScriptCall::Fee => Request::Fee,
            ScriptCall::TotalSales => Request::TotalSales,
            ScriptCall::GetSale { index } => Request::GetSale { index: *index },
            ScriptCall::GetCost { sold } => Request::GetCost {
                sold: units("sold", sold)?,
            },
            ScriptCall::Target => Request::Target,
            ScriptCall::TokenLimit => Request::TokenLimit,
            ScriptCall::Quote { sale_id, units: amount } => Request::Quote {
                sale_id: *sale_id,
                units: units("units", amount)?,
            },
            ScriptCall::BalanceOf { sale_id, holder } => Request::BalanceOf {
                sale_id: *sale_id,
                holder: actors.resolve(holder)?,
            },
        };

        Ok(Call::new(caller, request).with_value(value))
    }
}

fn units(field: &str, text: &str) -> CliResult<u128> {
    parse_units(text, DECIMALS).map_err(|e| CliError::InvalidScript(format!("{}: {}", field, e)))
}

/// Result line for one executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub op: &'static str,
    pub caller: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<RegistryEvent>,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<StepOutcome>,
    /// First failed step when running with `fail_fast`
    pub halted: Option<(usize, &'static str, LaunchpadError)>,
}

impl RunReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.is_ok()).count()
    }

    pub fn halt_error(&self) -> Option<CliError> {
        self.halted.as_ref().map(|(step, op, err)| CliError::StepFailed {
            step: *step,
            op: *op,
            source: err.clone(),
        })
    }
}

/// Execute compiled calls in order
///
/// A rejected call is recorded and leaves the registry unchanged; with
/// `fail_fast` the run stops at the first rejection.
pub fn run_calls(registry: &mut SaleRegistry, calls: &[Call], fail_fast: bool) -> RunReport {
    let mut report = RunReport::default();

    for (step, call) in calls.iter().enumerate() {
        let op = call.request.name();
        let result = registry.execute(call);
        let events = registry.drain_events();

        let outcome = match result {
            Ok(response) => {
                debug!(step, op, "step applied");
                StepOutcome {
                    step,
                    op,
                    caller: call.caller.to_string(),
                    result: Some(response),
                    error: None,
                    events,
                }
            }
            Err(err) => {
                warn!(step, op, error = %err, underpaid = err.is_underpayment(), "step rejected");
                let outcome = StepOutcome {
                    step,
                    op,
                    caller: call.caller.to_string(),
                    result: None,
                    error: Some(err.to_string()),
                    events,
                };
                if fail_fast {
                    report.outcomes.push(outcome);
                    report.halted = Some((step, op, err));
                    return report;
                }
                outcome
            }
        };
        report.outcomes.push(outcome);
    }

    report
}

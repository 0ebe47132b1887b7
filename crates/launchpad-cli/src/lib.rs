//! Command-line host for the launchpad engine
//!
//! Loads a TOML configuration, replays JSON call scripts against a
//! registry and persists the resulting state between runs.

pub mod actors;
pub mod config;
pub mod error;
pub mod script;
pub mod state;

pub use actors::ActorBook;
pub use config::{create_example_config, CurveConfig, LaunchpadConfig, SaleConfig};
pub use error::{CliError, CliResult};
pub use script::{run_calls, RunReport, Script, ScriptCall, Step, StepOutcome};
pub use state::{load_state, save_state, StateSummary};

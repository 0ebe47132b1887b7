//! Launchpad CLI
//!
//! Drives a bonding-curve sale registry from a TOML config and JSON call
//! scripts, keeping state in a JSON snapshot between runs.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use launchpad_cli::{
    create_example_config, load_state, run_calls, save_state, LaunchpadConfig, Script, StateSummary,
};
use launchpad_core::{format_units, parse_units, DECIMALS};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Bonding-curve token launchpad")]
struct Cli {
    /// Override log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write an example configuration file
    InitConfig {
        #[arg(short, long, default_value = "launchpad.toml")]
        output: PathBuf,
    },

    /// Replay a call script against the registry
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "launchpad.toml")]
        config: PathBuf,

        /// JSON call script
        #[arg(short, long)]
        script: PathBuf,

        /// State snapshot, loaded if present and written afterwards
        #[arg(long)]
        state: Option<PathBuf>,

        /// Stop at the first rejected call
        #[arg(long)]
        fail_fast: bool,
    },

    /// Price of the next token after `sold` tokens
    Quote {
        #[arg(short, long, default_value = "launchpad.toml")]
        config: PathBuf,

        /// Tokens already sold, as a decimal
        #[arg(long)]
        sold: String,

        /// Batch size to price, as a decimal
        #[arg(long)]
        units: Option<String>,
    },

    /// Print the sales held in a state snapshot
    Inspect {
        #[arg(long)]
        state: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::InitConfig { output } => {
            create_example_config(&output)?;
            info!("Example configuration written to {}", output.display());
        }
        Command::Run { config, script, state, fail_fast } => {
            run(config, script, state, fail_fast)?;
        }
        Command::Quote { config, sold, units } => {
            let config = LaunchpadConfig::load(&config)?;
            let curve = config.curve.to_curve()?;
            let sold = parse_units(&sold, DECIMALS)?;

            let mut line = serde_json::json!({
                "sold": format_units(sold, DECIMALS),
                "unit_price": format_units(curve.cost(sold)?, DECIMALS),
            });
            if let Some(units) = units {
                let units = parse_units(&units, DECIMALS)?;
                line["units"] = format_units(units, DECIMALS).into();
                line["total_cost"] = format_units(curve.total_cost(sold, units)?, DECIMALS).into();
            }
            println!("{}", line);
        }
        Command::Inspect { state } => {
            let registry = load_state(&state)?;
            println!("{}", serde_json::to_string_pretty(&StateSummary::from(&registry))?);
        }
    }

    Ok(())
}

fn run(config: PathBuf, script: PathBuf, state: Option<PathBuf>, fail_fast: bool) -> Result<()> {
    let config = LaunchpadConfig::load(&config)?;
    let actors = config.actors()?;

    let mut registry = match &state {
        Some(path) if path.exists() => {
            let registry = load_state(path)?;
            if *registry.config() != config.to_registry_config()? {
                warn!("State snapshot {} was created with different parameters; keeping the snapshot's", path.display());
            }
            registry
        }
        _ => config.build_registry()?,
    };

    let calls = Script::load(&script)?.compile(&actors)?;
    info!("Replaying {} calls from {}", calls.len(), script.display());

    let report = run_calls(&mut registry, &calls, fail_fast);
    for outcome in &report.outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }

    if let Some(path) = &state {
        save_state(path, &registry)?;
    }
    info!(
        "Applied {} of {} calls",
        report.outcomes.len() - report.failures(),
        calls.len()
    );

    match report.halt_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn init_logging(log_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("launchpad={0},launchpad_cli={0},launchpad_core={0}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

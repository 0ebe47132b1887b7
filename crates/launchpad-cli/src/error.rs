//! Error types for the launchpad CLI

use launchpad_core::LaunchpadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid script: {0}")]
    InvalidScript(String),

    #[error("Invalid actor {0:?}: expected an alias of 1-32 bytes or a base58 key")]
    InvalidActor(String),

    #[error("State snapshot error: {0}")]
    State(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Step {step} ({op}) failed: {source}")]
    StepFailed {
        step: usize,
        op: &'static str,
        source: LaunchpadError,
    },

    #[error(transparent)]
    Engine(#[from] LaunchpadError),
}

pub type CliResult<T> = Result<T, CliError>;

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::InvalidConfig(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

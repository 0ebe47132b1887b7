//! JSON state snapshots between CLI runs.

use std::fs;
use std::path::Path;

use launchpad_core::{FeeVault, SaleRegistry, SaleView};
use serde::Serialize;
use tracing::info;

use crate::error::{CliError, CliResult};

/// Load a snapshot and re-check its invariants
pub fn load_state(path: impl AsRef<Path>) -> CliResult<SaleRegistry> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("Failed to read state {}: {}", path.display(), e)))?;
    let registry: SaleRegistry = serde_json::from_str(&content)
        .map_err(|e| CliError::State(format!("{}: {}", path.display(), e)))?;
    registry
        .check_invariants()
        .map_err(|e| CliError::State(format!("{}: {}", path.display(), e)))?;

    info!(path = %path.display(), sales = registry.total_sales(), "state loaded");
    Ok(registry)
}

/// Write a snapshot through a temporary file so a crash never leaves half a file
pub fn save_state(path: impl AsRef<Path>, registry: &SaleRegistry) -> CliResult<()> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(registry)?;
    let staging = path.with_extension("tmp");
    fs::write(&staging, content)?;
    fs::rename(&staging, path)?;

    info!(path = %path.display(), sales = registry.total_sales(), "state saved");
    Ok(())
}

/// Listing printed by `inspect`
#[derive(Debug, Clone, Serialize)]
pub struct StateSummary {
    pub owner: String,
    pub registry_id: String,
    pub fee: u128,
    pub total_sales: u64,
    pub vault: FeeVault,
    pub sales: Vec<SaleView>,
}

impl From<&SaleRegistry> for StateSummary {
    fn from(registry: &SaleRegistry) -> Self {
        Self {
            owner: registry.owner().to_string(),
            registry_id: registry.registry_id().to_string(),
            fee: registry.fee(),
            total_sales: registry.total_sales(),
            vault: registry.vault().clone(),
            sales: registry.sales(),
        }
    }
}

//! Principal identities for config files and call scripts.
//!
//! Scripts name actors by short aliases ("creator", "alice"). Each alias maps
//! to a program-derived key under the registry identity, so the same alias
//! always resolves to the same principal across runs. A base58 key is used
//! as-is.

use std::str::FromStr;

use launchpad_core::Pubkey;
use solana_program::pubkey::MAX_SEED_LEN;

use crate::error::{CliError, CliResult};

pub const REGISTRY_SEED: &[u8] = b"registry";
pub const ACTOR_SEED: &[u8] = b"actor";

/// Identity of the registry for a config namespace
pub fn registry_identity(namespace: &str) -> CliResult<Pubkey> {
    let seed = seed_bytes(namespace)?;
    Ok(Pubkey::find_program_address(&[REGISTRY_SEED, seed], &Pubkey::default()).0)
}

fn seed_bytes(text: &str) -> CliResult<&[u8]> {
    let bytes = text.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_SEED_LEN {
        return Err(CliError::InvalidActor(text.to_string()));
    }
    Ok(bytes)
}

/// Resolves actor names to keys for one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorBook {
    registry_id: Pubkey,
}

impl ActorBook {
    pub fn new(registry_id: Pubkey) -> Self {
        Self { registry_id }
    }

    pub fn registry_id(&self) -> &Pubkey {
        &self.registry_id
    }

    /// A base58 key, or else an alias
    pub fn resolve(&self, name: &str) -> CliResult<Pubkey> {
        let name = name.trim();
        match Pubkey::from_str(name) {
            Ok(key) => Ok(key),
            Err(_) => self.alias(name),
        }
    }

    /// Key derived for `alias`
    pub fn alias(&self, alias: &str) -> CliResult<Pubkey> {
        let seed = seed_bytes(alias)?;
        Ok(Pubkey::find_program_address(&[ACTOR_SEED, seed], &self.registry_id).0)
    }
}

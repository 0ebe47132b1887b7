//! Serde adapters rendering `Pubkey` as base58 text, so snapshots and call
//! scripts stay readable and pubkey-keyed maps serialize to JSON objects.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use solana_program::pubkey::Pubkey;

/// `#[serde(with = "pubkey_string")]` for a single key
pub mod pubkey_string {
    use super::*;

    pub fn serialize<S>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&pubkey.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "pubkey_map")]` for a `BTreeMap<Pubkey, V>`
pub mod pubkey_map {
    use super::*;

    pub fn serialize<S, V>(map: &BTreeMap<Pubkey, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(map.iter().map(|(key, value)| (key.to_string(), value)))
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<Pubkey, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                Pubkey::from_str(&key)
                    .map(|key| (key, value))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

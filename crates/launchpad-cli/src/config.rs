use std::fs;
use std::path::Path;

use launchpad_core::{
    parse_units, PricingCurve, Pubkey, RegistryConfig, SaleRegistry, DECIMALS,
};
use serde::{Deserialize, Serialize};

use crate::actors::{registry_identity, ActorBook};
use crate::error::{CliError, CliResult};

/// Launchpad configuration loaded from TOML file
///
/// Amounts are decimal strings in whole-token / native-unit terms
/// (`"0.01"`), converted to 18-decimal fixed point on load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaunchpadConfig {
    /// Namespace the registry identity and actor aliases derive from
    pub namespace: String,

    /// Registry owner: actor alias or base58 key
    pub owner: String,

    /// Sale parameters shared by every launch
    pub sale: SaleConfig,

    /// Pricing curve shape
    pub curve: CurveConfig,
}

/// Per-sale economics
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SaleConfig {
    /// Exact value required to create a sale
    pub creation_fee: String,

    /// Tokens minted per sale
    pub total_supply: String,

    /// Tokens sold at which a sale closes
    pub token_limit: String,

    /// Value raised at which a sale closes
    pub target: String,

    /// Smallest accepted purchase in tokens
    pub min_purchase: String,

    /// Largest accepted purchase in tokens
    pub max_purchase: String,
}

/// Curve shape, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveConfig {
    /// Price starts at `floor` and rises by `step` every `increment` tokens sold
    Step {
        floor: String,
        step: String,
        increment: String,
    },
    /// Price starts at `base` and rises by `slope` per token sold
    Linear { base: String, slope: String },
}

impl LaunchpadConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let config: LaunchpadConfig = toml::from_str(&content)
            .map_err(|e| CliError::InvalidConfig(format!("Failed to parse config file {}: {}", path.display(), e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> CliResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.owner_key()? == self.registry_id()? {
            return Err(CliError::InvalidConfig("owner must differ from the registry identity".into()));
        }

        self.to_registry_config()?
            .validate()
            .map_err(|e| CliError::InvalidConfig(e.to_string()))
    }

    pub fn registry_id(&self) -> CliResult<Pubkey> {
        registry_identity(&self.namespace)
            .map_err(|_| CliError::InvalidConfig(format!("namespace {:?} must be 1-32 bytes", self.namespace)))
    }

    pub fn actors(&self) -> CliResult<ActorBook> {
        Ok(ActorBook::new(self.registry_id()?))
    }

    pub fn owner_key(&self) -> CliResult<Pubkey> {
        self.actors()?.resolve(&self.owner)
    }

    /// Convert the decimal strings into engine parameters
    pub fn to_registry_config(&self) -> CliResult<RegistryConfig> {
        let sale = &self.sale;
        Ok(RegistryConfig {
            creation_fee: amount("sale.creation_fee", &sale.creation_fee)?,
            total_supply: amount("sale.total_supply", &sale.total_supply)?,
            token_limit: amount("sale.token_limit", &sale.token_limit)?,
            target: amount("sale.target", &sale.target)?,
            curve: self.curve.to_curve()?,
            min_purchase: amount("sale.min_purchase", &sale.min_purchase)?,
            max_purchase: amount("sale.max_purchase", &sale.max_purchase)?,
        })
    }

    /// Fresh registry described by this configuration
    pub fn build_registry(&self) -> CliResult<SaleRegistry> {
        Ok(SaleRegistry::new(self.owner_key()?, self.registry_id()?, self.to_registry_config()?)?)
    }
}

impl CurveConfig {
    pub fn to_curve(&self) -> CliResult<PricingCurve> {
        Ok(match self {
            Self::Step { floor, step, increment } => PricingCurve::Step {
                floor: amount("curve.floor", floor)?,
                step: amount("curve.step", step)?,
                increment: amount("curve.increment", increment)?,
            },
            Self::Linear { base, slope } => PricingCurve::Linear {
                base: amount("curve.base", base)?,
                slope: amount("curve.slope", slope)?,
            },
        })
    }
}

fn amount(field: &str, text: &str) -> CliResult<u128> {
    parse_units(text, DECIMALS).map_err(|e| CliError::InvalidConfig(format!("{}: {}", field, e)))
}

impl Default for LaunchpadConfig {
    fn default() -> Self {
        Self {
            namespace: "launchpad".to_string(),
            owner: "deployer".to_string(),
            sale: SaleConfig {
                creation_fee: "0.01".to_string(),
                total_supply: "1000000".to_string(),
                token_limit: "500000".to_string(),
                target: "3".to_string(),
                min_purchase: "1".to_string(),
                max_purchase: "10000".to_string(),
            },
            curve: CurveConfig::Step {
                floor: "0.0001".to_string(),
                step: "0.0001".to_string(),
                increment: "10000".to_string(),
            },
        }
    }
}

/// Write a commented example configuration to `path`
pub fn create_example_config(path: impl AsRef<Path>) -> CliResult<()> {
    let body = toml::to_string_pretty(&LaunchpadConfig::default())?;
    let content = format!(
        "# Launchpad configuration\n\
         #\n\
         # Amounts are decimal strings with up to 18 fractional digits.\n\
         # `owner` is an actor alias or a base58 key; aliases derive from `namespace`.\n\
         # For a linear curve use: kind = \"linear\", base = \"0.0001\", slope = \"0.00000001\"\n\n{}",
        body
    );
    fs::write(path.as_ref(), content)?;
    Ok(())
}

//! # Ledger Configuration
//!
//! Deployment parameters of a badge ledger.
//!
//! ## Environment
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `BADGE_OWNER_ADDRESS` | yes | Contract owner (may mint on behalf of anyone) |
//! | `SOULBOUND_IDENTITY_ADDRESS` | yes | Identity registry the ledger is bound to |
//! | `BADGE_NAME` | no | Collection name (default `Verification Badge`) |
//! | `BADGE_SYMBOL` | no | Collection ticker (default `VBADGE`) |

use crate::domain::value_objects::Address;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Default collection name.
pub const DEFAULT_NAME: &str = "Verification Badge";

/// Default collection ticker.
pub const DEFAULT_SYMBOL: &str = "VBADGE";

/// Environment variable holding the contract owner.
pub const ENV_OWNER: &str = "BADGE_OWNER_ADDRESS";

/// Environment variable holding the identity registry address.
pub const ENV_IDENTITY_REGISTRY: &str = "SOULBOUND_IDENTITY_ADDRESS";

/// Environment variable overriding the collection name.
pub const ENV_NAME: &str = "BADGE_NAME";

/// Environment variable overriding the collection ticker.
pub const ENV_SYMBOL: &str = "BADGE_SYMBOL";

/// Badge ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Collection name.
    pub name: String,
    /// Collection ticker.
    pub symbol: String,
    /// Contract owner.
    pub owner: Address,
    /// Identity registry address.
    pub identity_registry: Address,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            owner: Address::ZERO,             // MUST be overridden
            identity_registry: Address::ZERO, // MUST be overridden
        }
    }
}

impl LedgerConfig {
    /// Default name and symbol with the given owner and registry.
    #[must_use]
    pub fn new(owner: Address, identity_registry: Address) -> Self {
        Self {
            owner,
            identity_registry,
            ..Self::default()
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Missing or malformed required variables, or a config that fails
    /// [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = |var: &'static str| -> Result<Address, ConfigError> {
            lookup(var)
                .ok_or(ConfigError::MissingVar(var))?
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidAddress { var, source })
        };

        let mut config = Self::new(address(ENV_OWNER)?, address(ENV_IDENTITY_REGISTRY)?);
        if let Some(name) = lookup(ENV_NAME) {
            config.name = name;
        }
        if let Some(symbol) = lookup(ENV_SYMBOL) {
            config.symbol = symbol;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration before a ledger is created from it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - the owner or the identity registry is the zero address
    /// - the name or symbol is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        if self.identity_registry.is_zero() {
            return Err(ConfigError::ZeroIdentityRegistry);
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyField("name"));
        }
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptyField("symbol"));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

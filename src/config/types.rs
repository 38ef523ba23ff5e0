//! Configuration types for exchange adapters
//!
//! These structs are loaded from YAML and handed to an adapter at init.
//! Adapters never load configuration themselves.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::signing::Credentials;
use crate::error::AppError;

pub const KEY_PROPERTY_NAME: &str = "key";
pub const SECRET_PROPERTY_NAME: &str = "secret";

const DEFAULT_CONNECTION_TIMEOUT_SECONDS: u64 = 30;

// ============================================================================
// Authentication
// ============================================================================

/// Named secrets, minimally `key` and `secret`
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AuthenticationConfig {
    items: HashMap<String, String>,
}

impl AuthenticationConfig {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.items.insert(name.into(), value.into());
    }

    /// Replace `key`/`secret` with `{PREFIX}_KEY`/`{PREFIX}_SECRET` when set
    pub fn override_from_env(&mut self, prefix: &str) {
        let prefix = prefix.to_ascii_uppercase();
        for name in [KEY_PROPERTY_NAME, SECRET_PROPERTY_NAME] {
            let var = format!("{}_{}", prefix, name.to_ascii_uppercase());
            if let Ok(value) = std::env::var(&var) {
                if !value.is_empty() {
                    tracing::debug!(var = %var, "Credential overridden from environment");
                    self.set(name, value);
                }
            }
        }
    }

    /// API key and secret, both required and non-empty
    pub fn credentials(&self) -> ExchangeResult<Credentials> {
        let required = |name: &str| {
            self.get(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    ExchangeError::Configuration(format!(
                        "Missing '{}' in authentication config",
                        name
                    ))
                })
        };

        Ok(Credentials::new(
            required(KEY_PROPERTY_NAME)?,
            required(SECRET_PROPERTY_NAME)?,
        ))
    }
}

impl fmt::Debug for AuthenticationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.items.keys().collect();
        names.sort();
        f.debug_struct("AuthenticationConfig")
            .field("items", &names)
            .finish()
    }
}

impl From<HashMap<String, String>> for AuthenticationConfig {
    fn from(items: HashMap<String, String>) -> Self {
        Self { items }
    }
}

// ============================================================================
// Network
// ============================================================================

/// Transport timeout plus the responses the engine treats as transient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Connection and read timeout
    pub connection_timeout_seconds: u64,
    pub non_fatal_http_status_codes: Vec<u16>,
    /// Substrings of error text that mark a failure as transient
    pub non_fatal_error_messages: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connection_timeout_seconds: DEFAULT_CONNECTION_TIMEOUT_SECONDS,
            non_fatal_http_status_codes: Vec::new(),
            non_fatal_error_messages: Vec::new(),
        }
    }
}

// ============================================================================
// Other (adapter specific)
// ============================================================================

/// Free-form adapter parameters, e.g. `buy-fee` and `sell-fee`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OtherConfig {
    items: HashMap<String, String>,
}

impl OtherConfig {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items.get(name).map(String::as_str)
    }
}

impl From<HashMap<String, String>> for OtherConfig {
    fn from(items: HashMap<String, String>) -> Self {
        Self { items }
    }
}

// ============================================================================
// Exchange / App
// ============================================================================

/// Everything one adapter needs at init
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub authentication: AuthenticationConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub other: OtherConfig,
}

/// Top-level YAML document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Adapter name understood by the factory (e.g. "bittrex")
    pub exchange: String,
    /// Market the check binary queries (e.g. "BTC-LTC")
    pub market: String,
    #[serde(default)]
    pub config: ExchangeConfig,
}

impl AppConfig {
    /// Validate configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        if self.exchange.trim().is_empty() {
            return Err(AppError::Config("Exchange name cannot be empty".to_string()));
        }

        if self.market.trim().is_empty() {
            return Err(AppError::Config("Market cannot be empty".to_string()));
        }

        if self.config.network.connection_timeout_seconds == 0 {
            return Err(AppError::Config(
                "connection_timeout_seconds must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

//! Configuration module for exchange adapters and the check binary
//!
//! This module provides:
//! - Configuration types (`AppConfig`, `ExchangeConfig`, `AuthenticationConfig`,
//!   `NetworkConfig`, `OtherConfig`)
//! - YAML loading functionality (`load_config`)
//! - Logging initialisation (`logging::init_logging`)

pub mod logging;
mod loader;
mod types;

// Re-export types
pub use types::{
    AppConfig, AuthenticationConfig, ExchangeConfig, NetworkConfig, OtherConfig,
    KEY_PROPERTY_NAME, SECRET_PROPERTY_NAME,
};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str};

//! Adapter factory for dynamic exchange selection
//!
//! Creates initialised `TradingApi` instances from config strings.

use crate::adapters::bittrex::BittrexAdapter;
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::TradingApi;
use crate::config::ExchangeConfig;

// =============================================================================
// Factory Functions
// =============================================================================

/// All supported exchange adapter names.
pub const SUPPORTED_EXCHANGES: &[&str] = &["bittrex"];

/// Create and initialise an adapter from a config name string.
///
/// Names are matched case-insensitively. Initialisation failures surface as
/// `Configuration` errors and no adapter is returned.
pub fn create_adapter(name: &str, config: &ExchangeConfig) -> ExchangeResult<Box<dyn TradingApi>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "bittrex" => Ok(Box::new(BittrexAdapter::from_config(config)?)),
        _ => Err(ExchangeError::Configuration(format!(
            "Unknown exchange adapter: '{}'. Supported: {}",
            name,
            SUPPORTED_EXCHANGES.join(", ")
        ))),
    }
}

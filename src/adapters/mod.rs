//! Exchange adapters behind one Trading API
//!
//! This module provides the canonical domain model, the error taxonomy, the
//! `TradingApi` trait, the shared protocol toolkit and the concrete exchange
//! adapters built on it.

pub mod bittrex;
pub mod errors;
pub mod factory;
pub mod shared;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use bittrex::BittrexAdapter;
pub use errors::{ErrorKind, ExchangeError, ExchangeResult};
pub use factory::{create_adapter, SUPPORTED_EXCHANGES};
pub use traits::TradingApi;
pub use types::{BalanceInfo, MarketOrder, MarketOrderBook, OpenOrder, OrderType};

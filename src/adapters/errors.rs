//! Exchange adapter error types
//!
//! Every adapter failure is one of four kinds. Callers branch on the variant
//! (or on [`ErrorKind`]) rather than on where the error came from.

use thiserror::Error;

use crate::adapters::shared::transport::RawResponse;

/// Coarse classification of an [`ExchangeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Network,
    TradingApi,
    InvalidArgument,
}

/// Exchange-specific error types for adapter operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Adapter cannot reach the ready state: bad credentials, bad key, bad fee config
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transient transport failure, or a response configured as non-fatal
    #[error("Network error: {0}")]
    Network(String),

    /// Exchange returned something unusable for this call (raw response boxed to reduce enum size)
    #[error("Trading API error: {message}")]
    TradingApi {
        message: String,
        response: Option<Box<RawResponse>>,
    },

    /// Caller input rejected before any request was built
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ExchangeError {
    /// Build a `TradingApi` error, keeping the raw response for diagnostics
    pub fn trading_api(message: impl Into<String>, response: Option<&RawResponse>) -> Self {
        ExchangeError::TradingApi {
            message: message.into(),
            response: response.map(|r| Box::new(r.clone())),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExchangeError::Configuration(_) => ErrorKind::Configuration,
            ExchangeError::Network(_) => ErrorKind::Network,
            ExchangeError::TradingApi { .. } => ErrorKind::TradingApi,
            ExchangeError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Only network failures are worth re-invoking the adapter for.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// Raw exchange response attached to a `TradingApi` error, if any
    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            ExchangeError::TradingApi { response, .. } => response.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;

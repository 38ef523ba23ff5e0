//! Non-fatal response classification
//!
//! The engine configures HTTP status codes and message fragments that should
//! be treated as transient. This module only applies that configuration; it
//! never decides what belongs in it.

use std::collections::HashSet;

use crate::adapters::errors::ExchangeError;
use crate::adapters::shared::transport::RawResponse;
use crate::config::NetworkConfig;

/// Applies the configured non-fatal status codes and message substrings
#[derive(Debug, Clone, Default)]
pub struct FailureClassifier {
    status_codes: HashSet<u16>,
    messages: Vec<String>,
}

impl FailureClassifier {
    pub fn new(network: &NetworkConfig) -> Self {
        Self {
            status_codes: network.non_fatal_http_status_codes.iter().copied().collect(),
            messages: network
                .non_fatal_error_messages
                .iter()
                .filter(|m| !m.is_empty())
                .cloned()
                .collect(),
        }
    }

    pub fn is_non_fatal_status(&self, status_code: u16) -> bool {
        self.status_codes.contains(&status_code)
    }

    /// True when `text` contains any configured non-fatal fragment
    pub fn is_non_fatal_message(&self, text: &str) -> bool {
        self.messages.iter().any(|m| text.contains(m.as_str()))
    }

    /// Downgrade a received response to `Network` when its status is non-fatal,
    /// or when a non-2xx body carries a non-fatal message.
    pub fn classify_response(&self, raw: RawResponse) -> Result<RawResponse, ExchangeError> {
        if self.is_non_fatal_status(raw.status_code) {
            tracing::warn!(status = raw.status_code, "Non-fatal HTTP status from exchange");
            return Err(ExchangeError::Network(format!(
                "Non-fatal HTTP status {} from exchange: {}",
                raw.status_code, raw.payload
            )));
        }

        if !(200..300).contains(&raw.status_code) && self.is_non_fatal_message(&raw.payload) {
            tracing::warn!(status = raw.status_code, "Non-fatal error message from exchange");
            return Err(ExchangeError::Network(format!(
                "Non-fatal error from exchange: {}",
                raw
            )));
        }

        Ok(raw)
    }

    /// Downgrade an unexpected transport failure to `Network` when its text
    /// matches a configured fragment. Other kinds pass through unchanged.
    pub fn classify_failure(&self, err: ExchangeError) -> ExchangeError {
        match err {
            ExchangeError::TradingApi { ref message, .. } if self.is_non_fatal_message(message) => {
                tracing::warn!(error = %message, "Non-fatal transport failure");
                ExchangeError::Network(message.clone())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> FailureClassifier {
        FailureClassifier::new(&NetworkConfig {
            connection_timeout_seconds: 30,
            non_fatal_http_status_codes: vec![502, 503, 504, 520, 522, 525],
            non_fatal_error_messages: vec![
                "Connection reset".to_string(),
                "Remote host closed connection during handshake".to_string(),
                "MARKET_OFFLINE".to_string(),
            ],
        })
    }

    #[test]
    fn test_non_fatal_status_becomes_network_error() {
        let err = classifier()
            .classify_response(RawResponse::new(503, "Service Unavailable"))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::Network(_)));
    }

    #[test]
    fn test_other_status_passes_through() {
        let raw = classifier()
            .classify_response(RawResponse::new(400, r#"{"success":false}"#))
            .unwrap();
        assert_eq!(raw.status_code, 400);
    }

    #[test]
    fn test_non_fatal_message_in_error_body() {
        let err = classifier()
            .classify_response(RawResponse::new(500, "upstream said MARKET_OFFLINE"))
            .unwrap_err();
        assert!(matches!(err, ExchangeError::Network(_)));
    }

    #[test]
    fn test_message_in_successful_body_is_ignored() {
        let raw = RawResponse::new(200, r#"{"success":true,"result":{"Notice":"Connection reset"}}"#);
        assert!(classifier().classify_response(raw).is_ok());
    }

    #[test]
    fn test_unexpected_failure_upgraded_when_message_matches() {
        let err = ExchangeError::trading_api("Connection reset by peer", None);
        assert!(matches!(classifier().classify_failure(err), ExchangeError::Network(_)));
    }

    #[test]
    fn test_unexpected_failure_kept_when_message_unknown() {
        let err = ExchangeError::trading_api("too many redirects", None);
        assert!(matches!(
            classifier().classify_failure(err),
            ExchangeError::TradingApi { .. }
        ));
    }

    #[test]
    fn test_empty_configuration_classifies_nothing() {
        let classifier = FailureClassifier::default();
        assert!(classifier.classify_response(RawResponse::new(503, "x")).is_ok());
        assert!(!classifier.is_non_fatal_message("anything"));
    }
}

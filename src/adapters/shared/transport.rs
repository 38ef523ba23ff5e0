//! Network transport
//!
//! Executes exactly one HTTP request and hands back the raw status and body.
//! Any HTTP status is returned uninterpreted; only failures to complete the
//! exchange at all become errors. Nothing here retries.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::request::HttpMethod;
use crate::config::NetworkConfig;

/// Uninterpreted transport result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub payload: String,
}

impl RawResponse {
    pub fn new(status_code: u16, payload: impl Into<String>) -> Self {
        Self {
            status_code,
            payload: payload.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

impl fmt::Display for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} - {}", self.status_code, self.payload)
    }
}

/// A fully built request, ready to put on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends one request and returns the raw response.
///
/// Implementations classify low-level failures (timeout, refused or reset
/// connection, DNS, malformed URL) as `ExchangeError::Network`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> ExchangeResult<RawResponse>;
}

// =============================================================================
// reqwest-backed transport
// =============================================================================

/// Default HTTP transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client honouring the configured connection/read timeout.
    pub fn new(network: &NetworkConfig) -> ExchangeResult<Self> {
        let timeout = Duration::from_secs(network.connection_timeout_seconds);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                ExchangeError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            phase = "init",
            timeout_s = network.connection_timeout_seconds,
            "HTTP transport configured"
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> ExchangeResult<RawResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status_code = response.status().as_u16();
        let payload = response.text().await.map_err(|e| {
            ExchangeError::Network(format!("Failed to read response body: {}", e))
        })?;

        Ok(RawResponse {
            status_code,
            payload,
        })
    }
}

/// Map a reqwest failure onto the adapter error taxonomy.
///
/// Anything that stops the request completing is transient. What remains
/// (redirect loops and the like) is unexpected and surfaces as `TradingApi`
/// so the non-fatal message list can still upgrade it.
pub fn classify_transport_error(err: &reqwest::Error) -> ExchangeError {
    if err.is_timeout() {
        ExchangeError::Network(format!("Request timed out: {}", err))
    } else if err.is_connect() {
        ExchangeError::Network(format!("Connection failed: {}", err))
    } else if err.is_builder() {
        ExchangeError::Network(format!("Malformed request: {}", err))
    } else if err.is_request() || err.is_body() {
        ExchangeError::Network(format!("Request failed: {}", err))
    } else {
        ExchangeError::trading_api(
            format!("Failed to connect to Exchange due to unexpected IO error: {}", err),
            None,
        )
    }
}

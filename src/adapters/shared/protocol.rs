//! Exchange-independent request pipeline
//!
//! [`ProtocolKit`] owns everything an adapter needs to talk to one exchange
//! except the payload shapes: credentials, signer, nonce, transport and the
//! non-fatal classifier. Adapters describe an endpoint, hand over the logical
//! parameters and a mapping function, and get back domain values or an
//! [`ExchangeError`].
//!
//! Per call:
//! 1. private endpoints get the nonce and API key injected, the request URI is
//!    built once and signed, the signature travels as a header
//! 2. the transport sends it; transport failures propagate as `Network`
//! 3. configured non-fatal statuses/messages become `Network`
//! 4. anything but HTTP 200 is a `TradingApi` error
//! 5. the envelope is decoded; `success = false` is a `TradingApi` error
//! 6. the result is handed to the adapter's mapping function

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::classify::FailureClassifier;
use crate::adapters::shared::envelope::{self, DecodeError, EnvelopeSchema};
use crate::adapters::shared::request::{build_url, Endpoint, HttpMethod, QueryParams};
use crate::adapters::shared::signing::{Credentials, HmacSigner, NonceCounter};
use crate::adapters::shared::transport::{HttpRequest, RawResponse, Transport};
use crate::config::NetworkConfig;

/// Static description of how one exchange frames requests and replies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeProfile {
    /// Short name used in logs (e.g. "bittrex")
    pub name: &'static str,
    /// Base URL every endpoint path is appended to, with trailing slash
    pub base_url: String,
    pub envelope: EnvelopeSchema,
    /// Header carrying the request signature
    pub signature_header: &'static str,
    pub nonce_param: &'static str,
    pub api_key_param: &'static str,
}

/// Shared protocol machinery for one adapter instance
pub struct ProtocolKit {
    profile: ExchangeProfile,
    api_key: String,
    signer: HmacSigner,
    nonce: NonceCounter,
    transport: Arc<dyn Transport>,
    classifier: FailureClassifier,
}

impl std::fmt::Debug for ProtocolKit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolKit")
            .field("profile", &self.profile)
            .field("nonce", &self.nonce)
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl ProtocolKit {
    /// Initialise the signer and seed the nonce from the clock.
    #[tracing::instrument(skip_all, fields(exchange = profile.name))]
    pub fn new(
        profile: ExchangeProfile,
        credentials: &Credentials,
        network: &NetworkConfig,
        transport: Arc<dyn Transport>,
    ) -> ExchangeResult<Self> {
        if credentials.api_key.is_empty() {
            return Err(ExchangeError::Configuration("API key is empty".to_string()));
        }
        let signer = HmacSigner::new(&credentials.api_secret)?;

        Ok(Self {
            profile,
            api_key: credentials.api_key.clone(),
            signer,
            nonce: NonceCounter::from_clock(),
            transport,
            classifier: FailureClassifier::new(network),
        })
    }

    /// Replace the clock-seeded nonce (deterministic tests, restored state)
    pub fn with_nonce(mut self, nonce: NonceCounter) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn profile(&self) -> &ExchangeProfile {
        &self.profile
    }

    pub fn nonce(&self) -> &NonceCounter {
        &self.nonce
    }

    /// Build the wire request for an endpoint.
    ///
    /// For private endpoints this consumes exactly one nonce. The signed
    /// string and the transmitted URL are the same `String`.
    pub fn prepare(&self, endpoint: &Endpoint, mut params: QueryParams) -> ExchangeResult<HttpRequest> {
        if endpoint.is_private() {
            params.insert(self.profile.nonce_param, self.nonce.next_nonce()?.to_string());
            params.insert(self.profile.api_key_param, self.api_key.as_str());

            let url = build_url(&self.profile.base_url, endpoint.path, &params);
            let signature = self.signer.sign(&url);

            let request = HttpRequest::new(endpoint.method, url)
                .header(self.profile.signature_header, signature);
            Ok(match endpoint.method {
                HttpMethod::Post => request.body(""),
                HttpMethod::Get => request,
            })
        } else {
            let url = build_url(&self.profile.base_url, endpoint.path, &params);
            Ok(HttpRequest::new(endpoint.method, url)
                .header("Content-Type", "application/x-www-form-urlencoded"))
        }
    }

    /// Send a request and apply non-fatal classification.
    ///
    /// Any HTTP status comes back as a `RawResponse` unless configured as
    /// non-fatal.
    pub async fn execute(&self, endpoint: &Endpoint, params: QueryParams) -> ExchangeResult<RawResponse> {
        let request = self.prepare(endpoint, params)?;
        tracing::debug!(
            exchange = self.profile.name,
            method = %request.method,
            path = endpoint.path,
            "Sending request"
        );

        let raw = self
            .transport
            .send(request)
            .await
            .map_err(|e| self.classifier.classify_failure(e))?;

        tracing::debug!(
            exchange = self.profile.name,
            path = endpoint.path,
            status = raw.status_code,
            payload = %raw.payload,
            "Exchange response"
        );

        self.classifier.classify_response(raw)
    }

    /// Full call: send, decode the envelope as `T`, map with `map`.
    ///
    /// `context` prefixes every `TradingApi` message (e.g. "Failed to get
    /// ticker from exchange. Details: ").
    pub async fn call<T, R, F>(
        &self,
        endpoint: &Endpoint,
        params: QueryParams,
        context: &str,
        map: F,
    ) -> ExchangeResult<R>
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> ExchangeResult<R>,
    {
        let raw = self.execute(endpoint, params).await?;
        self.require_ok(&raw, context)?;

        let envelope = envelope::decode::<T>(&raw.payload, &self.profile.envelope)
            .map_err(|e| self.decode_failure(context, e, &raw))?;
        self.require_success(envelope.success, envelope.message.as_deref(), context, &raw)?;

        let result = envelope
            .result
            .ok_or_else(|| self.fail(format!("{}missing result in {}", context, raw), &raw))?;

        map(result).map_err(|e| self.attach_response(context, e, &raw))
    }

    /// Call for endpoints where only `success` matters.
    pub async fn acknowledge(
        &self,
        endpoint: &Endpoint,
        params: QueryParams,
        context: &str,
    ) -> ExchangeResult<()> {
        let raw = self.execute(endpoint, params).await?;
        self.require_ok(&raw, context)?;

        let envelope = envelope::decode_ack(&raw.payload, &self.profile.envelope)
            .map_err(|e| self.decode_failure(context, e, &raw))?;
        self.require_success(envelope.success, envelope.message.as_deref(), context, &raw)
    }

    fn require_ok(&self, raw: &RawResponse, context: &str) -> ExchangeResult<()> {
        if raw.is_ok() {
            Ok(())
        } else {
            Err(self.fail(format!("{}{}", context, raw), raw))
        }
    }

    fn require_success(
        &self,
        success: bool,
        message: Option<&str>,
        context: &str,
        raw: &RawResponse,
    ) -> ExchangeResult<()> {
        if success {
            return Ok(());
        }

        if let Some(message) = message.filter(|m| self.classifier.is_non_fatal_message(m)) {
            tracing::warn!(exchange = self.profile.name, message, "Non-fatal error message from exchange");
            return Err(ExchangeError::Network(format!("{}{}", context, message)));
        }

        Err(self.fail(format!("{}{}", context, raw), raw))
    }

    fn decode_failure(&self, context: &str, err: DecodeError, raw: &RawResponse) -> ExchangeError {
        self.fail(format!("{}{} in {}", context, err, raw), raw)
    }

    /// Mapping errors come back without a response; attach it here.
    fn attach_response(&self, context: &str, err: ExchangeError, raw: &RawResponse) -> ExchangeError {
        match err {
            ExchangeError::TradingApi { message, response: None } => {
                self.fail(format!("{}{}", context, message), raw)
            }
            other => other,
        }
    }

    fn fail(&self, message: String, raw: &RawResponse) -> ExchangeError {
        tracing::error!(exchange = self.profile.name, "{}", message);
        ExchangeError::trading_api(message, Some(raw))
    }
}

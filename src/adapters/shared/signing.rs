//! Request signing and nonce issuance
//!
//! Private endpoints are authenticated with an HMAC-SHA512 digest of the
//! canonical request string, keyed by the raw API secret and rendered as
//! 128 lowercase hex characters. Each request also carries a nonce that must
//! never repeat or go backwards for the lifetime of the adapter.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::adapters::errors::{ExchangeError, ExchangeResult};

type HmacSha512 = Hmac<Sha512>;

// =============================================================================
// Credentials
// =============================================================================

/// API key and shared secret, fixed for the adapter's lifetime
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Signer
// =============================================================================

/// HMAC-SHA512 request signer.
///
/// The keyed context is derived once from the secret and cloned per
/// signature, so `sign` takes `&self` and is safe to share across threads.
///
/// ```ignore
/// let signer = HmacSigner::new("api_secret")?;
/// let signature = signer.sign("https://host/api/v1.1/market/getopenorders?apikey=k&nonce=1");
/// assert_eq!(signature.len(), 128);
/// ```
#[derive(Clone)]
pub struct HmacSigner {
    context: HmacSha512,
}

impl HmacSigner {
    /// Derive the keyed-hash context from the raw secret bytes.
    ///
    /// # Errors
    ///
    /// `Configuration` if the secret is empty or rejected as a key.
    pub fn new(secret: &str) -> ExchangeResult<Self> {
        if secret.is_empty() {
            return Err(ExchangeError::Configuration(
                "Failed to setup MAC security. Secret key is empty".to_string(),
            ));
        }

        let context = HmacSha512::new_from_slice(secret.as_bytes()).map_err(|e| {
            ExchangeError::Configuration(format!(
                "Failed to setup MAC security. Secret key seems invalid: {}",
                e
            ))
        })?;

        Ok(Self { context })
    }

    /// Sign a canonical request string.
    ///
    /// Pure function of the input and the key: identical input always yields
    /// the identical 128-character lowercase hex string.
    pub fn sign(&self, canonical_request: &str) -> String {
        let mut mac = self.context.clone();
        mac.update(canonical_request.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("algorithm", &"HmacSHA512")
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Nonce
// =============================================================================

/// Strictly increasing nonce owned by a single adapter instance
#[derive(Debug)]
pub struct NonceCounter {
    next: AtomicU64,
}

impl NonceCounter {
    /// Seed from the current Unix time in seconds.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::starting_at(seed)
    }

    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    /// Return the current value and advance the counter.
    ///
    /// A single atomic update, so concurrent callers never observe the same
    /// value twice. Once the counter reaches `u64::MAX` every call fails
    /// instead of wrapping back to zero.
    pub fn next_nonce(&self) -> ExchangeResult<u64> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_add(1))
            .map_err(|last| {
                ExchangeError::Configuration(format!("Nonce space exhausted at {}", last))
            })
    }

    /// Value the next call to `next_nonce` will return
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

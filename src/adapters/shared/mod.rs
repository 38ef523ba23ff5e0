//! Protocol machinery shared by every exchange adapter
//!
//! Nothing in here knows about a specific exchange. An adapter supplies an
//! `ExchangeProfile`, an endpoint table and mapping functions; the rest
//! (signing, nonce, transport, classification, envelope decoding) lives here.

pub mod classify;
pub mod envelope;
pub mod fees;
pub mod lifecycle;
pub mod protocol;
pub mod request;
pub mod signing;
pub mod time;
pub mod transport;

pub use classify::FailureClassifier;
pub use envelope::{Envelope, EnvelopeSchema};
pub use protocol::{ExchangeProfile, ProtocolKit};
pub use request::{Endpoint, HttpMethod, QueryParams};
pub use signing::{Credentials, HmacSigner, NonceCounter};
pub use transport::{HttpRequest, HttpTransport, RawResponse, Transport};

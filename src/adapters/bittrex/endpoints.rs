//! Bittrex v1.1 endpoint table and protocol profile

use crate::adapters::shared::envelope::EnvelopeSchema;
use crate::adapters::shared::protocol::ExchangeProfile;
use crate::adapters::shared::request::Endpoint;

pub const IMPL_NAME: &str = "Bittrex API v1.1";
pub const EXCHANGE_NAME: &str = "bittrex";
pub const BASE_URL: &str = "https://bittrex.com/api/v1.1/";
/// Optional other-config entry replacing `BASE_URL`
pub const BASE_URL_PROPERTY_NAME: &str = "base-url";

// Public
pub const GET_ORDER_BOOK: Endpoint = Endpoint::public("public/getorderbook");
pub const GET_TICKER: Endpoint = Endpoint::public("public/getticker");

// Market (private)
pub const GET_OPEN_ORDERS: Endpoint = Endpoint::private("market/getopenorders");
pub const BUY_LIMIT: Endpoint = Endpoint::private("market/buylimit");
pub const SELL_LIMIT: Endpoint = Endpoint::private("market/selllimit");
pub const CANCEL: Endpoint = Endpoint::private("market/cancel");

// Account (private)
pub const GET_BALANCES: Endpoint = Endpoint::private("account/getbalances");

// Error context prefixes
pub const FAILED_TO_GET_MARKET_ORDERS: &str = "Failed to get Market Order Book from exchange. Details: ";
pub const FAILED_TO_GET_BALANCE: &str = "Failed to get Balance from exchange. Details: ";
pub const FAILED_TO_GET_TICKER: &str = "Failed to get Ticker from exchange. Details: ";
pub const FAILED_TO_GET_OPEN_ORDERS: &str = "Failed to get Open Orders from exchange. Details: ";
pub const FAILED_TO_ADD_ORDER: &str = "Failed to Add Order on exchange. Details: ";
pub const FAILED_TO_CANCEL_ORDER: &str = "Failed to Cancel Order on exchange. Details: ";

/// Protocol profile rooted at `base_url` (overridable for tests)
pub fn profile(base_url: impl Into<String>) -> ExchangeProfile {
    let mut base_url = base_url.into();
    if !base_url.ends_with('/') {
        base_url.push('/');
    }

    ExchangeProfile {
        name: EXCHANGE_NAME,
        base_url,
        envelope: EnvelopeSchema::STANDARD,
        signature_header: "apisign",
        nonce_param: "nonce",
        api_key_param: "apikey",
    }
}

//! Bittrex v1.1 wire records
//!
//! Only the fields the mapping reads are declared; everything else in the
//! payload is ignored.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// `[price, quantity, ...]`; trailing elements are ignored
pub type BittrexBookEntry = Vec<Decimal>;

/// `public/getorderbook` result
#[derive(Debug, Clone, Deserialize)]
pub struct BittrexOrderBook {
    #[serde(default)]
    pub buy: Vec<BittrexBookEntry>,
    #[serde(default)]
    pub sell: Vec<BittrexBookEntry>,
}

/// `public/getticker` result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexTicker {
    pub last: Decimal,
}

/// `market/getopenorders` result, keyed by order id
#[derive(Debug, Clone, Deserialize)]
pub struct BittrexOpenOrders {
    #[serde(default)]
    pub open: BTreeMap<String, BittrexOpenOrder>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexOpenOrder {
    /// Market the order belongs to (e.g. "BTC-LTC")
    pub exchange: String,
    /// `LIMIT_BUY` or `LIMIT_SELL`
    pub order_type: String,
    pub quantity: Decimal,
    pub quantity_remaining: Decimal,
    pub limit: Decimal,
    pub opened: String,
}

/// `market/buylimit` / `market/selllimit` result
#[derive(Debug, Clone, Deserialize)]
pub struct BittrexOrderCreated {
    pub uuid: String,
}

/// One row of the `account/getbalances` result array
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexBalance {
    pub currency: String,
    pub available: Decimal,
    pub pending: Decimal,
}

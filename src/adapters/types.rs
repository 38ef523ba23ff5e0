//! Core data types for exchange adapters
//!
//! These types are the canonical domain model returned by every adapter,
//! independent of how any one exchange names or shapes its payloads.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapters::errors::ExchangeError;

// =============================================================================
// Order Side
// =============================================================================

/// Side of an order: the only two values an adapter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "BUY",
            OrderType::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ExchangeError;

    /// Parse a caller-supplied side; anything but BUY/SELL is rejected
    /// before a request is ever built.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(OrderType::Buy),
            "SELL" => Ok(OrderType::Sell),
            other => Err(ExchangeError::InvalidArgument(format!(
                "Invalid order type: {} - Can only be BUY or SELL",
                other
            ))),
        }
    }
}

// =============================================================================
// Market Data
// =============================================================================

/// A single resting order in the public order book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrder {
    pub order_type: OrderType,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Always `price * quantity`
    pub total: Decimal,
}

impl MarketOrder {
    pub fn new(order_type: OrderType, price: Decimal, quantity: Decimal) -> Self {
        Self {
            order_type,
            price,
            quantity,
            total: price * quantity,
        }
    }
}

/// Order book snapshot for one market
///
/// Level ordering is whatever the exchange returned; adapters do not re-sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderBook {
    pub market_id: String,
    pub sell_orders: Vec<MarketOrder>,
    pub buy_orders: Vec<MarketOrder>,
}

impl MarketOrderBook {
    pub fn new(
        market_id: impl Into<String>,
        sell_orders: Vec<MarketOrder>,
        buy_orders: Vec<MarketOrder>,
    ) -> Self {
        Self {
            market_id: market_id.into(),
            sell_orders,
            buy_orders,
        }
    }
}

// =============================================================================
// Account Data
// =============================================================================

/// One of the caller's orders still open on the exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub market_id: String,
    pub order_type: OrderType,
    pub price: Decimal,
    pub quantity_remaining: Decimal,
    pub original_quantity: Decimal,
    pub total_value: Decimal,
}

/// Account balances keyed by currency code
///
/// `on_hold` is empty for exchanges that do not report reserved funds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub available: HashMap<String, Decimal>,
    pub on_hold: HashMap<String, Decimal>,
}

impl BalanceInfo {
    pub fn new(available: HashMap<String, Decimal>, on_hold: HashMap<String, Decimal>) -> Self {
        Self { available, on_hold }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_order_total_is_price_times_quantity() {
        let order = MarketOrder::new(OrderType::Buy, dec!(100), dec!(2));
        assert_eq!(order.total, dec!(200));
    }

    #[test]
    fn test_order_type_parses_case_insensitive() {
        assert_eq!("buy".parse::<OrderType>().unwrap(), OrderType::Buy);
        assert_eq!(" SELL ".parse::<OrderType>().unwrap(), OrderType::Sell);
    }

    #[test]
    fn test_order_type_rejects_unknown_side() {
        let err = "HOLD".parse::<OrderType>().unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidArgument(_)));
        assert!(err.to_string().contains("HOLD"));
    }

    #[test]
    fn test_order_type_display() {
        assert_eq!(OrderType::Buy.to_string(), "BUY");
        assert_eq!(OrderType::Sell.to_string(), "SELL");
    }
}

//! Trading API trait definition
//!
//! The `TradingApi` trait is the whole contract the trading engine and its
//! strategies depend on. Every exchange adapter implements it identically in
//! signature and behaviour; nothing exchange-specific leaks through it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType};

/// Uniform operation set exposed by every exchange adapter
///
/// All operations fail with `Configuration` until the adapter is initialised.
/// Network-bound operations may fail with `Network` (transient, the caller
/// may re-invoke) or `TradingApi` (fatal for that call).
///
/// # Example
///
/// ```ignore
/// let adapter = create_adapter("bittrex", &config.config)?;
/// let book = adapter.get_market_orders("BTC-LTC").await?;
/// let id = adapter.create_order("BTC-LTC", OrderType::Buy, dec!(1), dec!(0.01)).await?;
/// adapter.cancel_order(&id, "BTC-LTC").await?;
/// ```
#[async_trait]
pub trait TradingApi: Send + Sync {
    /// Human readable adapter name (e.g. "Bittrex API v1.1")
    fn impl_name(&self) -> &str;

    /// Current order book for a market, both sides, in exchange order
    async fn get_market_orders(&self, market_id: &str) -> ExchangeResult<MarketOrderBook>;

    /// The caller's open orders on a market
    async fn get_your_open_orders(&self, market_id: &str) -> ExchangeResult<Vec<OpenOrder>>;

    /// Place a limit order
    ///
    /// # Returns
    /// The exchange-assigned order id
    ///
    /// # Errors
    /// `InvalidArgument` for non-positive quantity or price, before any
    /// request is sent.
    async fn create_order(
        &self,
        market_id: &str,
        order_type: OrderType,
        quantity: Decimal,
        price: Decimal,
    ) -> ExchangeResult<String>;

    /// Cancel an order; `market_id` is ignored by exchanges that key orders
    /// by id alone
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> ExchangeResult<bool>;

    async fn get_latest_market_price(&self, market_id: &str) -> ExchangeResult<Decimal>;

    async fn get_balance_info(&self) -> ExchangeResult<BalanceInfo>;

    /// Buy fee as a fraction (0.0025 for 0.25%). Never touches the network.
    async fn get_percentage_of_buy_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> ExchangeResult<Decimal>;

    /// Sell fee as a fraction. Never touches the network.
    async fn get_percentage_of_sell_order_taken_for_exchange_fee(
        &self,
        market_id: &str,
    ) -> ExchangeResult<Decimal>;
}

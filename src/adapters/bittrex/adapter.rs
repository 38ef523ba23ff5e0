//! Bittrex adapter implementation
//!
//! Composes the shared protocol kit with the Bittrex endpoint table and
//! mapping functions behind the [`TradingApi`] trait.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::adapters::bittrex::endpoints::{self, IMPL_NAME};
use crate::adapters::bittrex::mapping;
use crate::adapters::bittrex::types::{
    BittrexBalance, BittrexOpenOrders, BittrexOrderBook, BittrexOrderCreated, BittrexTicker,
};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::fees::FeeSchedule;
use crate::adapters::shared::lifecycle::AdapterState;
use crate::adapters::shared::protocol::ProtocolKit;
use crate::adapters::shared::request::QueryParams;
use crate::adapters::shared::transport::{HttpTransport, Transport};
use crate::adapters::traits::TradingApi;
use crate::adapters::types::{BalanceInfo, MarketOrderBook, OpenOrder, OrderType};
use crate::config::ExchangeConfig;

/// Everything that exists only once init has succeeded
#[derive(Debug)]
struct Session {
    kit: ProtocolKit,
    fees: FeeSchedule,
}

/// Bittrex v1.1 REST adapter
///
/// Construct, then [`init`](Self::init) exactly once. Every operation fails
/// with `Configuration` until init succeeds.
pub struct BittrexAdapter {
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
    state: AdapterState<Session>,
}

impl std::fmt::Debug for BittrexAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BittrexAdapter")
            .field("base_url", &self.base_url)
            .field("custom_transport", &self.transport.is_some())
            .field("state", &self.state)
            .finish()
    }
}

impl Default for BittrexAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl BittrexAdapter {
    pub fn new() -> Self {
        Self {
            base_url: endpoints::BASE_URL.to_string(),
            transport: None,
            state: AdapterState::default(),
        }
    }

    /// Point the adapter at another host (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a caller-supplied transport instead of building one from config
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Construct and initialise in one step
    pub fn from_config(config: &ExchangeConfig) -> ExchangeResult<Self> {
        let mut adapter = Self::new();
        adapter.init(config)?;
        Ok(adapter)
    }

    /// Load credentials, network config and fees, set up signing and seed
    /// the nonce. Runs once; a failure leaves the adapter unusable.
    ///
    /// A `base-url` entry in the other config overrides the base URL.
    #[tracing::instrument(skip_all, fields(exchange = endpoints::EXCHANGE_NAME))]
    pub fn init(&mut self, config: &ExchangeConfig) -> ExchangeResult<()> {
        tracing::info!("About to initialise Bittrex ExchangeConfig");

        let base_url = config
            .other
            .get(endpoints::BASE_URL_PROPERTY_NAME)
            .map(str::to_string)
            .unwrap_or_else(|| self.base_url.clone());
        let transport = self.transport.clone();

        self.state.initialize(|| {
            let credentials = config.authentication.credentials()?;
            let transport: Arc<dyn Transport> = match transport {
                Some(transport) => transport,
                None => Arc::new(HttpTransport::new(&config.network)?),
            };

            let kit = ProtocolKit::new(
                endpoints::profile(base_url),
                &credentials,
                &config.network,
                transport,
            )?;
            let fees = FeeSchedule::from_other_config(&config.other)?;

            Ok(Session { kit, fees })
        })?;

        tracing::info!(impl_name = IMPL_NAME, "Adapter ready");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    fn session(&self) -> ExchangeResult<&Session> {
        self.state.ready()
    }
}

fn require_positive(name: &str, value: Decimal) -> ExchangeResult<()> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ExchangeError::InvalidArgument(format!(
            "Order {} must be positive (got {})",
            name, value
        )))
    }
}

#[async_trait]
impl TradingApi for BittrexAdapter {
    fn impl_name(&self) -> &str {
        IMPL_NAME
    }

    async fn get_market_orders(&self, market_id: &str) -> ExchangeResult<MarketOrderBook> {
        let session = self.session()?;
        let params = QueryParams::new().with("market", market_id).with("type", "both");

        session
            .kit
            .call(
                &endpoints::GET_ORDER_BOOK,
                params,
                endpoints::FAILED_TO_GET_MARKET_ORDERS,
                |book: BittrexOrderBook| mapping::to_order_book(market_id, book),
            )
            .await
    }

    async fn get_your_open_orders(&self, market_id: &str) -> ExchangeResult<Vec<OpenOrder>> {
        let session = self.session()?;
        let params = QueryParams::new().with("market", market_id);

        session
            .kit
            .call(
                &endpoints::GET_OPEN_ORDERS,
                params,
                endpoints::FAILED_TO_GET_OPEN_ORDERS,
                |orders: BittrexOpenOrders| mapping::to_open_orders(market_id, orders),
            )
            .await
    }

    async fn create_order(
        &self,
        market_id: &str,
        order_type: OrderType,
        quantity: Decimal,
        price: Decimal,
    ) -> ExchangeResult<String> {
        require_positive("quantity", quantity)?;
        require_positive("price", price)?;
        let session = self.session()?;

        let endpoint = match order_type {
            OrderType::Buy => &endpoints::BUY_LIMIT,
            OrderType::Sell => &endpoints::SELL_LIMIT,
        };
        let params = QueryParams::new()
            .with("market", market_id)
            .with("rate", mapping::format_order_decimal(price))
            .with("quantity", mapping::format_order_decimal(quantity));

        let order_id = session
            .kit
            .call(
                endpoint,
                params,
                endpoints::FAILED_TO_ADD_ORDER,
                |created: BittrexOrderCreated| Ok(created.uuid),
            )
            .await?;

        tracing::info!(market = market_id, side = %order_type, order_id = %order_id, "Order created");
        Ok(order_id)
    }

    async fn cancel_order(&self, order_id: &str, _market_id: &str) -> ExchangeResult<bool> {
        let session = self.session()?;
        let params = QueryParams::new().with("uuid", order_id);

        session
            .kit
            .acknowledge(&endpoints::CANCEL, params, endpoints::FAILED_TO_CANCEL_ORDER)
            .await?;

        tracing::info!(order_id, "Order cancelled");
        Ok(true)
    }

    async fn get_latest_market_price(&self, market_id: &str) -> ExchangeResult<Decimal> {
        let session = self.session()?;
        let params = QueryParams::new().with("market", market_id);

        session
            .kit
            .call(
                &endpoints::GET_TICKER,
                params,
                endpoints::FAILED_TO_GET_TICKER,
                |ticker: BittrexTicker| Ok(ticker.last),
            )
            .await
    }

    async fn get_balance_info(&self) -> ExchangeResult<BalanceInfo> {
        let session = self.session()?;

        session
            .kit
            .call(
                &endpoints::GET_BALANCES,
                QueryParams::new(),
                endpoints::FAILED_TO_GET_BALANCE,
                |balances: Vec<BittrexBalance>| Ok(mapping::to_balance_info(balances)),
            )
            .await
    }

    async fn get_percentage_of_buy_order_taken_for_exchange_fee(
        &self,
        _market_id: &str,
    ) -> ExchangeResult<Decimal> {
        Ok(self.session()?.fees.buy)
    }

    async fn get_percentage_of_sell_order_taken_for_exchange_fee(
        &self,
        _market_id: &str,
    ) -> ExchangeResult<Decimal> {
        Ok(self.session()?.fees.sell)
    }
}

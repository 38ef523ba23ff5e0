//! End-to-End Integration Tests
//!
//! Drives a factory-created `Box<dyn TradingApi>` through one full trade
//! cycle against a mock exchange:
//! 1. Config loading and adapter initialization
//! 2. Market data (ticker, order book)
//! 3. Account data (balances, open orders)
//! 4. Order placement and cancellation
//! 5. Failure classification the engine branches on
//!
//! # Running the tests
//! ```bash
//! cargo test --test full_cycle
//! ```

use mockito::{Matcher, ServerGuard};
use rust_decimal_macros::dec;

use exchange_adapters::adapters::errors::{ErrorKind, ExchangeError};
use exchange_adapters::adapters::{create_adapter, OrderType, TradingApi};
use exchange_adapters::config::load_config_from_str;

// =============================================================================
// Helpers
// =============================================================================

fn config_yaml(base_url: &str) -> String {
    format!(
        r#"
exchange: bittrex
market: BTC-LTC
config:
  authentication:
    key: integration-key
    secret: integration-secret
  network:
    connection_timeout_seconds: 5
    non_fatal_http_status_codes: [502, 503, 504]
    non_fatal_error_messages:
      - "Connection reset"
      - "APIKEY_THROTTLED"
  other:
    buy-fee: "0.25"
    sell-fee: "0.25"
    base-url: "{}/"
"#,
        base_url
    )
}

fn build_adapter(server: &ServerGuard) -> Box<dyn TradingApi> {
    let app = load_config_from_str(&config_yaml(&server.url())).unwrap();
    create_adapter(&app.exchange, &app.config).unwrap()
}

fn signed() -> Matcher {
    Matcher::Regex("^[0-9a-f]{128}$".into())
}

fn private_query(extra: Vec<Matcher>) -> Matcher {
    let mut matchers = vec![
        Matcher::UrlEncoded("apikey".into(), "integration-key".into()),
        Matcher::Regex(r"nonce=\d+".into()),
    ];
    matchers.extend(extra);
    Matcher::AllOf(matchers)
}

fn ok(result: &str) -> String {
    format!(r#"{{"success":true,"message":"","result":{}}}"#, result)
}

// =============================================================================
// Full Cycle
// =============================================================================

#[tokio::test]
async fn test_full_trade_cycle() {
    let mut server = mockito::Server::new_async().await;
    let market = "BTC-LTC";

    let ticker = server
        .mock("GET", "/public/getticker")
        .match_query(Matcher::UrlEncoded("market".into(), market.into()))
        .with_status(200)
        .with_body(ok(r#"{"Bid":0.0120,"Ask":0.0124,"Last":0.0122}"#))
        .create_async()
        .await;

    let book = server
        .mock("GET", "/public/getorderbook")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("market".into(), market.into()),
            Matcher::UrlEncoded("type".into(), "both".into()),
        ]))
        .with_status(200)
        .with_body(ok(r#"{"buy":[[0.0120,10],[0.0119,4]],"sell":[[0.0124,3]]}"#))
        .create_async()
        .await;

    let balances = server
        .mock("POST", "/account/getbalances")
        .match_query(private_query(vec![]))
        .match_header("apisign", signed())
        .with_status(200)
        .with_body(ok(
            r#"[{"Currency":"BTC","Balance":1.6,"Available":1.5,"Pending":0.1},
                {"Currency":"LTC","Balance":20,"Available":20,"Pending":0}]"#,
        ))
        .create_async()
        .await;

    let buy = server
        .mock("POST", "/market/buylimit")
        .match_query(private_query(vec![
            Matcher::UrlEncoded("market".into(), market.into()),
            Matcher::UrlEncoded("rate".into(), "0.0121".into()),
            Matcher::UrlEncoded("quantity".into(), "2".into()),
        ]))
        .match_header("apisign", signed())
        .with_status(200)
        .with_body(ok(r#"{"uuid":"e606d53c-8d70-11e3-94b5-425861b86ab6"}"#))
        .create_async()
        .await;

    let open_orders = server
        .mock("POST", "/market/getopenorders")
        .match_query(private_query(vec![Matcher::UrlEncoded("market".into(), market.into())]))
        .match_header("apisign", signed())
        .with_status(200)
        .with_body(ok(
            r#"{"open":{"e606d53c-8d70-11e3-94b5-425861b86ab6":{
                "Exchange":"BTC-LTC","OrderType":"LIMIT_BUY","Quantity":2,"QuantityRemaining":2,
                "Limit":0.0121,"CommissionPaid":0,"Price":0,"Opened":"2014-07-09T03:55:48.77"}}}"#,
        ))
        .create_async()
        .await;

    let cancel = server
        .mock("POST", "/market/cancel")
        .match_query(private_query(vec![Matcher::UrlEncoded(
            "uuid".into(),
            "e606d53c-8d70-11e3-94b5-425861b86ab6".into(),
        )]))
        .match_header("apisign", signed())
        .with_status(200)
        .with_body(ok("null"))
        .create_async()
        .await;

    let adapter = build_adapter(&server);
    assert_eq!(adapter.impl_name(), "Bittrex API v1.1");

    // Market data
    assert_eq!(adapter.get_latest_market_price(market).await.unwrap(), dec!(0.0122));

    let order_book = adapter.get_market_orders(market).await.unwrap();
    assert_eq!(order_book.buy_orders.len(), 2);
    assert_eq!(order_book.sell_orders.len(), 1);
    assert_eq!(order_book.buy_orders[0].total, dec!(0.12));

    // Account data
    let balance = adapter.get_balance_info().await.unwrap();
    assert_eq!(balance.available["BTC"], dec!(1.5));
    assert_eq!(balance.on_hold["BTC"], dec!(0.1));
    assert_eq!(balance.available["LTC"], dec!(20));

    // Fees are static
    let buy_fee = adapter
        .get_percentage_of_buy_order_taken_for_exchange_fee(market)
        .await
        .unwrap();
    assert_eq!(buy_fee.to_string(), "0.00250000");

    // Order lifecycle
    let order_id = adapter
        .create_order(market, OrderType::Buy, dec!(2.000), dec!(0.0121))
        .await
        .unwrap();
    assert_eq!(order_id, "e606d53c-8d70-11e3-94b5-425861b86ab6");

    let open = adapter.get_your_open_orders(market).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, order_id);
    assert_eq!(open[0].order_type, OrderType::Buy);
    assert_eq!(open[0].total_value, dec!(0.0242));

    assert!(adapter.cancel_order(&order_id, market).await.unwrap());

    for mock in [ticker, book, balances, buy, open_orders, cancel] {
        mock.assert_async().await;
    }
}

// =============================================================================
// Failure Classification
// =============================================================================

#[tokio::test]
async fn test_throttled_envelope_is_retryable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/account/getbalances")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":false,"message":"APIKEY_THROTTLED","result":null}"#)
        .create_async()
        .await;

    let err = build_adapter(&server).get_balance_info().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_business_rejection_is_fatal_for_the_call() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/market/selllimit")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":false,"message":"INSUFFICIENT_FUNDS","result":null}"#)
        .create_async()
        .await;

    let err = build_adapter(&server)
        .create_order("BTC-LTC", OrderType::Sell, dec!(100), dec!(0.5))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TradingApi);
    assert!(!err.is_retryable());
    match err {
        ExchangeError::TradingApi { message, response } => {
            assert!(message.starts_with("Failed to Add Order on exchange. Details: "));
            assert!(response.unwrap().payload.contains("INSUFFICIENT_FUNDS"));
        }
        other => panic!("expected TradingApi, got {:?}", other),
    }
}

#[tokio::test]
async fn test_gateway_error_is_retryable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/public/getorderbook")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = build_adapter(&server).get_market_orders("BTC-LTC").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_invalid_side_rejected_before_request() {
    let side = "SHORT".parse::<OrderType>();
    assert!(matches!(side, Err(ExchangeError::InvalidArgument(_))));
}

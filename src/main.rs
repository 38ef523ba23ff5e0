//! Adapter smoke-check entry point
//!
//! Read-only smoke check of an exchange adapter:
//! 1. Loads `.env` and the YAML configuration
//! 2. Builds and initialises the adapter through the factory
//! 3. Prints latest price, order book depth and fee fractions
//!
//! Usage: `adapter_check [config.yaml]` (default `config.yaml`)

use std::path::PathBuf;

use exchange_adapters::adapters::create_adapter;
use exchange_adapters::config::{self, logging::init_logging};
use exchange_adapters::AppError;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();
    init_logging();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.yaml"));

    info!(path = %path.display(), "Loading configuration");
    let mut app = match config::load_config(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("[ERROR] Configuration failed: {}", e);
            std::process::exit(1);
        }
    };
    app.config.authentication.override_from_env(&app.exchange);

    let adapter = create_adapter(&app.exchange, &app.config)?;
    info!(adapter = adapter.impl_name(), market = %app.market, "Adapter ready");

    let market = app.market.as_str();
    let price = adapter.get_latest_market_price(market).await?;
    let book = adapter.get_market_orders(market).await?;
    let buy_fee = adapter
        .get_percentage_of_buy_order_taken_for_exchange_fee(market)
        .await?;
    let sell_fee = adapter
        .get_percentage_of_sell_order_taken_for_exchange_fee(market)
        .await?;

    let summary = serde_json::json!({
        "exchange": adapter.impl_name(),
        "market": market,
        "latest_price": price,
        "bids": book.buy_orders.len(),
        "asks": book.sell_orders.len(),
        "best_bid": book.buy_orders.first(),
        "best_ask": book.sell_orders.first(),
        "buy_fee": buy_fee,
        "sell_fee": sell_fee,
    });
    println!("{}", serde_json::to_string_pretty(&summary).map_err(AppError::from)?);

    Ok(())
}

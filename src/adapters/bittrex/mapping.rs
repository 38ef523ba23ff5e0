//! Bittrex wire records to domain model
//!
//! Pure functions, no I/O. Errors raised here come back without a raw
//! response; the protocol kit attaches it.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::adapters::bittrex::types::{
    BittrexBalance, BittrexBookEntry, BittrexOpenOrders, BittrexOrderBook,
};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::time::parse_timestamp;
use crate::adapters::types::{BalanceInfo, MarketOrder, MarketOrderBook, OpenOrder, OrderType};

/// Fractional digits Bittrex accepts for rate and quantity
const ORDER_DECIMAL_PLACES: u32 = 8;

pub fn to_order_book(market_id: &str, book: BittrexOrderBook) -> ExchangeResult<MarketOrderBook> {
    let side = |order_type: OrderType, entries: Vec<BittrexBookEntry>| {
        entries
            .iter()
            .map(|entry| to_market_order(order_type, entry))
            .collect::<ExchangeResult<Vec<_>>>()
    };

    Ok(MarketOrderBook::new(
        market_id,
        side(OrderType::Sell, book.sell)?,
        side(OrderType::Buy, book.buy)?,
    ))
}

fn to_market_order(order_type: OrderType, entry: &[Decimal]) -> ExchangeResult<MarketOrder> {
    match entry {
        [price, quantity, ..] => Ok(MarketOrder::new(order_type, *price, *quantity)),
        short => Err(ExchangeError::trading_api(
            format!("Order book row needs price and quantity. Value: {:?}", short),
            None,
        )),
    }
}

pub fn to_order_type(value: &str) -> ExchangeResult<OrderType> {
    match value {
        "LIMIT_BUY" => Ok(OrderType::Buy),
        "LIMIT_SELL" => Ok(OrderType::Sell),
        other => Err(ExchangeError::trading_api(
            format!("Unrecognised order type received in getYourOpenOrders(). Value: {}", other),
            None,
        )),
    }
}

/// Open orders for `market_id` only; the endpoint may return other markets.
///
/// The reported cost is always zero, so total value is `limit * quantity`.
pub fn to_open_orders(market_id: &str, orders: BittrexOpenOrders) -> ExchangeResult<Vec<OpenOrder>> {
    orders
        .open
        .into_iter()
        .filter(|(_, order)| order.exchange.eq_ignore_ascii_case(market_id))
        .map(|(id, order)| {
            Ok(OpenOrder {
                id,
                created_at: parse_timestamp(&order.opened)?,
                market_id: market_id.to_string(),
                order_type: to_order_type(&order.order_type)?,
                price: order.limit,
                quantity_remaining: order.quantity_remaining,
                original_quantity: order.quantity,
                total_value: order.limit * order.quantity,
            })
        })
        .collect()
}

/// `Available` is free to trade, `Pending` is on hold.
pub fn to_balance_info(balances: Vec<BittrexBalance>) -> BalanceInfo {
    let mut available = HashMap::with_capacity(balances.len());
    let mut on_hold = HashMap::with_capacity(balances.len());

    for balance in balances {
        available.insert(balance.currency.clone(), balance.available);
        on_hold.insert(balance.currency, balance.pending);
    }

    BalanceInfo::new(available, on_hold)
}

/// At most 8 fractional digits, banker's rounding, no trailing zeros.
pub fn format_order_decimal(value: Decimal) -> String {
    value
        .round_dp_with_strategy(ORDER_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
        .normalize()
        .to_string()
}

//! Static exchange fee percentages
//!
//! Most exchanges expose no fee endpoint, so fees come from configuration as
//! percent strings and are converted once, at init, to fractions.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::config::OtherConfig;

pub const BUY_FEE_PROPERTY_NAME: &str = "buy-fee";
pub const SELL_FEE_PROPERTY_NAME: &str = "sell-fee";

/// Decimal places kept after converting a percentage to a fraction
const FEE_SCALE: u32 = 8;

/// Buy and sell fee fractions (0..=1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub buy: Decimal,
    pub sell: Decimal,
}

impl FeeSchedule {
    /// Read `buy-fee` and `sell-fee` from adapter-specific config.
    pub fn from_other_config(other: &OtherConfig) -> ExchangeResult<Self> {
        let buy = percent_to_fraction(BUY_FEE_PROPERTY_NAME, required(other, BUY_FEE_PROPERTY_NAME)?)?;
        tracing::info!(buy_fee = %buy, "Buy fee % in decimal format");

        let sell = percent_to_fraction(SELL_FEE_PROPERTY_NAME, required(other, SELL_FEE_PROPERTY_NAME)?)?;
        tracing::info!(sell_fee = %sell, "Sell fee % in decimal format");

        Ok(Self { buy, sell })
    }
}

fn required<'a>(other: &'a OtherConfig, name: &str) -> ExchangeResult<&'a str> {
    other
        .get(name)
        .ok_or_else(|| ExchangeError::Configuration(format!("Missing '{}' in other config", name)))
}

/// `percent / 100`, rounded half-up to 8 decimal places.
pub fn percent_to_fraction(name: &str, percent: &str) -> ExchangeResult<Decimal> {
    let value = Decimal::from_str(percent.trim()).map_err(|e| {
        ExchangeError::Configuration(format!("Invalid '{}' value '{}': {}", name, percent, e))
    })?;

    if value.is_sign_negative() || value > Decimal::ONE_HUNDRED {
        return Err(ExchangeError::Configuration(format!(
            "'{}' must be between 0 and 100 percent (got {})",
            name, percent
        )));
    }

    let mut fraction = (value / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(FEE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    fraction.rescale(FEE_SCALE);
    Ok(fraction)
}

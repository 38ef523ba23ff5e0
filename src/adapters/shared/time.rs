//! Exchange timestamp parsing
//!
//! Exchange timestamps are UTC without an offset. Sub-second precision is
//! tried first, then whole seconds.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::adapters::errors::{ExchangeError, ExchangeResult};

/// Primary format: fractional seconds of any precision
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// Fallback format: whole seconds only
pub const DATE_FORMAT_NO_MILLIS: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_timestamp(value: &str) -> ExchangeResult<DateTime<Utc>> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, DATE_FORMAT_NO_MILLIS))
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            ExchangeError::trading_api(format!("Illegal date/time format '{}': {}", value, e), None)
        })
}

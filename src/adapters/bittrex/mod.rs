//! Bittrex Exchange Adapter
//!
//! REST API v1.1. HMAC-SHA512 signed query strings for private endpoints,
//! `{success, message, result}` envelopes for every reply.
//!
//! This module is organized into submodules:
//! - `endpoints` - Base URL, endpoint table, error context strings
//! - `types` - Wire records for each result shape
//! - `mapping` - Wire records to domain model
//! - `adapter` - Main BittrexAdapter implementation

mod adapter;
pub mod endpoints;
mod mapping;
mod types;

pub use adapter::BittrexAdapter;

//! Exchange adapter protocol layer
//!
//! One normalized Trading API over heterogeneous exchange REST APIs:
//! - Request signing and nonce discipline
//! - Transport with transient/fatal failure classification
//! - Envelope decoding and mapping into a canonical domain model

pub mod adapters;
pub mod config;
pub mod error;

pub use error::AppError;

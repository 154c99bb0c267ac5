//! Point-in-time currency conversion.
//!
//! Rates are supplied by the caller per conversion; the engine never fetches
//! or caches them.

pub mod error;
pub mod service;

#[cfg(test)]
mod props;

pub use error::CurrencyError;
pub use service::{Conversion, CurrencyConverter};

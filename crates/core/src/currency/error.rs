//! Currency error types.

use moneta_shared::Currency;
use thiserror::Error;

/// Currency-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// No exchange rate is available for the currency pair.
    #[error("No exchange rate available for {from} -> {to}")]
    RateUnavailable {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
    },
}

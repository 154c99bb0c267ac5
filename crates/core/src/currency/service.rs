//! Currency conversion with Banker's Rounding.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Round to the currency's 2-decimal minor unit
//! - Use banker's rounding (round half to even)
//! - Round exactly once; the result is stored, never re-derived

use moneta_shared::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::CurrencyError;

/// Decimal places of the supported currencies' minor units.
const MINOR_UNIT_DECIMALS: u32 = 2;

/// The outcome of a conversion: the converted amount and the exact rate
/// applied, recorded together so the pair can be locked onto a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// Converted amount, rounded once to the minor unit.
    pub amount: Decimal,
    /// Exchange rate that produced it (1 source = rate target).
    pub rate: Decimal,
}

/// Currency conversion service.
pub struct CurrencyConverter;

impl CurrencyConverter {
    /// Converts `amount` from `from` to `to` using the supplied rate lookup.
    ///
    /// A same-currency conversion returns the amount untouched with rate 1 -
    /// no multiplication, no rounding drift. Otherwise the looked-up rate is
    /// applied and the product rounded half-to-even at 2 decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::RateUnavailable`] when the lookup has no
    /// rate for the pair.
    pub fn convert<F>(
        amount: Decimal,
        from: Currency,
        to: Currency,
        rate_lookup: F,
    ) -> Result<Conversion, CurrencyError>
    where
        F: Fn(Currency, Currency) -> Option<Decimal>,
    {
        if from == to {
            return Ok(Conversion {
                amount,
                rate: Decimal::ONE,
            });
        }

        let rate =
            rate_lookup(from, to).ok_or(CurrencyError::RateUnavailable { from, to })?;

        Ok(Conversion {
            amount: (amount * rate)
                .round_dp_with_strategy(MINOR_UNIT_DECIMALS, RoundingStrategy::MidpointNearestEven),
            rate,
        })
    }
}

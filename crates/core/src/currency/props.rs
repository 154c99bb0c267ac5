//! Property-based tests for currency conversion.

use moneta_shared::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::CurrencyConverter;

/// Strategy to generate signed decimal amounts (-1,000,000.00 to 1,000,000.00).
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* amount, a same-currency conversion SHALL return the
    /// identical amount with rate 1 - bit-exact, no rounding.
    #[test]
    fn prop_same_currency_is_exact_identity(amount in any_amount()) {
        let no_rates = |_: Currency, _: Currency| None;
        let conversion =
            CurrencyConverter::convert(amount, Currency::Eur, Currency::Eur, no_rates).unwrap();
        prop_assert_eq!(conversion.amount, amount);
        prop_assert_eq!(conversion.rate, Decimal::ONE);
    }

    /// *For any* amount and rate, the converted amount SHALL carry at most
    /// 2 decimal places.
    #[test]
    fn prop_converted_amount_has_at_most_2_decimals(
        amount in any_amount(),
        rate in positive_rate(),
    ) {
        let lookup = |_: Currency, _: Currency| Some(rate);
        let conversion =
            CurrencyConverter::convert(amount, Currency::Usd, Currency::Eur, lookup).unwrap();
        let scaled = conversion.amount * Decimal::ONE_HUNDRED;
        prop_assert_eq!(scaled, scaled.round());
    }

    /// *For any* amount and rate, conversion SHALL be deterministic and
    /// record exactly the rate it applied.
    #[test]
    fn prop_conversion_is_deterministic_and_records_rate(
        amount in any_amount(),
        rate in positive_rate(),
    ) {
        let lookup = |_: Currency, _: Currency| Some(rate);
        let first =
            CurrencyConverter::convert(amount, Currency::Usd, Currency::Idr, lookup).unwrap();
        let second =
            CurrencyConverter::convert(amount, Currency::Usd, Currency::Idr, lookup).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.rate, rate);
    }
}

//! Currency conversion and report rounding.
//!
//! CRITICAL: Rounding strategy for multi-currency reports:
//! - Balances round to 2 decimal places, rates to 6
//! - Use banker's rounding (round half to even)
//! - Round once at the end of the pipeline, never mid-computation

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places for money amounts in report output.
pub const BALANCE_DECIMALS: u32 = 2;

/// Decimal places for exchange rates in report output.
pub const RATE_DECIMALS: u32 = 6;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    let converted = amount * rate;
    converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Rounds a money amount to report precision.
#[must_use]
pub fn round_balance(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(BALANCE_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Rounds an exchange rate to report precision.
#[must_use]
pub fn round_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(RATE_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_amount() {
        let result = convert_amount(dec!(100), dec!(17.5), 2);
        assert_eq!(result, dec!(1750.00));
    }

    #[test]
    fn test_bankers_rounding() {
        // round half to even: 2.5 -> 2, 3.5 -> 4
        assert_eq!(convert_amount(dec!(1), dec!(2.5), 0), dec!(2));
        assert_eq!(convert_amount(dec!(1), dec!(3.5), 0), dec!(4));
    }

    #[test]
    fn test_round_balance_two_places() {
        assert_eq!(round_balance(dec!(10.005)), dec!(10.00));
        assert_eq!(round_balance(dec!(10.015)), dec!(10.02));
    }

    #[test]
    fn test_round_rate_six_places() {
        assert_eq!(round_rate(dec!(0.05128205128)), dec!(0.051282));
    }
}

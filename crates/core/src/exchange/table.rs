//! Per-pass exchange rate table.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use balanza_shared::types::{Currency, ExchangeRateTypeId};
use balanza_shared::AppResult;

use super::rate::ExchangeRateSource;

/// Rates to one target currency, loaded once per valuation pass.
#[derive(Debug, Clone)]
pub struct RateTable {
    target: Currency,
    date: NaiveDate,
    rates: HashMap<Currency, Decimal>,
}

impl RateTable {
    /// Loads the table from the source with a single `rates` call.
    ///
    /// Only rates into `target` are retained; the target currency itself
    /// always converts at 1.
    pub fn load(
        source: &dyn ExchangeRateSource,
        rate_type: ExchangeRateTypeId,
        target: Currency,
        date: NaiveDate,
    ) -> AppResult<Self> {
        let mut rates = HashMap::new();
        for rate in source.rates(rate_type, date)? {
            if rate.to_currency == target {
                rates.insert(rate.from_currency, rate.rate);
            }
        }
        rates.insert(target, Decimal::ONE);
        Ok(Self {
            target,
            date,
            rates,
        })
    }

    /// The valuation target currency.
    #[must_use]
    pub const fn target(&self) -> Currency {
        self.target
    }

    /// The as-of date the table was loaded for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Rate converting `from` into the target currency, if registered.
    #[must_use]
    pub fn rate_for(&self, from: Currency) -> Option<Decimal> {
        self.rates.get(&from).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::rate::ExchangeRate;
    use rust_decimal_macros::dec;

    struct FixedRates(Vec<ExchangeRate>);

    impl ExchangeRateSource for FixedRates {
        fn rates(
            &self,
            _rate_type: ExchangeRateTypeId,
            _as_of: NaiveDate,
        ) -> AppResult<Vec<ExchangeRate>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_load_filters_to_target() {
        let rate_type = ExchangeRateTypeId::new();
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let source = FixedRates(vec![
            ExchangeRate::new(rate_type, Currency::Usd, Currency::Mxn, dec!(20), date),
            ExchangeRate::new(rate_type, Currency::Usd, Currency::Eur, dec!(0.9), date),
        ]);

        let table = RateTable::load(&source, rate_type, Currency::Mxn, date).unwrap();
        assert_eq!(table.rate_for(Currency::Usd), Some(dec!(20)));
        assert_eq!(table.rate_for(Currency::Mxn), Some(Decimal::ONE));
        assert_eq!(table.rate_for(Currency::Eur), None);
    }
}

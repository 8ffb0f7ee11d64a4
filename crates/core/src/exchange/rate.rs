//! Exchange rate types and the rate source contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use balanza_shared::types::{Currency, ExchangeRateTypeId};
use balanza_shared::AppResult;

/// Exchange-rate-type classification (daily market, monthly valuation, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateType {
    /// Unique identifier.
    pub id: ExchangeRateTypeId,
    /// Mnemonic name.
    pub name: String,
}

/// Exchange rate between two currencies on a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Rate type classification.
    pub rate_type: ExchangeRateTypeId,
    /// Source currency.
    pub from_currency: Currency,
    /// Target currency.
    pub to_currency: Currency,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(
        rate_type: ExchangeRateTypeId,
        from_currency: Currency,
        to_currency: Currency,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            rate_type,
            from_currency,
            to_currency,
            rate,
            effective_date,
        }
    }

    /// Returns the inverse rate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            rate_type: self.rate_type,
            from_currency: self.to_currency,
            to_currency: self.from_currency,
            rate: Decimal::ONE / self.rate,
            effective_date: self.effective_date,
        }
    }
}

/// Source of exchange rates for one rate type on one date.
///
/// Lookups are pure reads against reference data that never changes for a
/// closed accounting date, so implementations need no locking.
pub trait ExchangeRateSource: Sync {
    /// Returns all registered rates for the rate type as of the given date.
    fn rates(&self, rate_type: ExchangeRateTypeId, as_of: NaiveDate)
        -> AppResult<Vec<ExchangeRate>>;
}

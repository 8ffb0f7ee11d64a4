//! Query validation, performed once before the engine runs.

use chrono::NaiveDate;
use thiserror::Error;

use crate::chart::AccountNumber;

use super::types::{ReportType, TrialBalanceQuery};

/// Errors for queries rejected before the engine runs.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The accounts chart id is nil.
    #[error("Accounts chart id must not be empty")]
    EmptyAccountsChart,

    /// Period dates are out of order.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Period start date.
        start: NaiveDate,
        /// Period end date.
        end: NaiveDate,
    },

    /// Account range bounds are out of order.
    #[error("Invalid account range: {from} is after {to}")]
    InvalidAccountRange {
        /// Range start account.
        from: AccountNumber,
        /// Range end account.
        to: AccountNumber,
    },

    /// Comparative reports need two periods.
    #[error("Comparative reports require a final period")]
    MissingFinalPeriod,

    /// Valuation was requested without a rate type.
    #[error("Valuation requested without an exchange rate type")]
    MissingRateType,

    /// Consolidation needs every period valuated first; summing native
    /// balances of different currencies is meaningless.
    #[error("Consolidating to the target currency requires valuation directives on every period")]
    ConsolidationWithoutValuation,
}

/// Validates a query before the engine is invoked.
///
/// # Errors
///
/// Returns a [`QueryError`] describing the first rule the query violates.
pub fn validate_query(query: &TrialBalanceQuery) -> Result<(), QueryError> {
    if query.accounts_chart_id.is_nil() {
        return Err(QueryError::EmptyAccountsChart);
    }

    let mut periods = vec![&query.initial_period];
    periods.extend(query.final_period.as_ref());
    for period in periods {
        if period.from_date > period.to_date {
            return Err(QueryError::InvalidDateRange {
                start: period.from_date,
                end: period.to_date,
            });
        }
        if period.use_default_valuation && period.exchange_rate_type.is_none() {
            return Err(QueryError::MissingRateType);
        }
        if query.consolidate_to_target_currency && !period.valuation_requested() {
            return Err(QueryError::ConsolidationWithoutValuation);
        }
    }

    if let (Some(from), Some(to)) = (&query.from_account, &query.to_account) {
        if from > to {
            return Err(QueryError::InvalidAccountRange {
                from: from.clone(),
                to: to.clone(),
            });
        }
    }

    if query.report_type == ReportType::Comparative && query.final_period.is_none() {
        return Err(QueryError::MissingFinalPeriod);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::BalancesPeriod;
    use balanza_shared::types::{AccountsChartId, Currency, ExchangeRateTypeId};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_query() -> TrialBalanceQuery {
        TrialBalanceQuery::new(
            ReportType::Traditional,
            AccountsChartId::new(),
            BalancesPeriod::new(date(2025, 1, 1), date(2025, 1, 31)),
        )
    }

    #[test]
    fn test_valid_query_passes() {
        assert!(validate_query(&valid_query()).is_ok());
    }

    #[test]
    fn test_nil_chart_rejected() {
        let mut query = valid_query();
        query.accounts_chart_id = AccountsChartId::from_uuid(Uuid::nil());
        assert!(matches!(
            validate_query(&query),
            Err(QueryError::EmptyAccountsChart)
        ));
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let mut query = valid_query();
        query.initial_period = BalancesPeriod::new(date(2025, 2, 1), date(2025, 1, 1));
        assert!(matches!(
            validate_query(&query),
            Err(QueryError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_reversed_account_range_rejected() {
        let query = valid_query()
            .with_account_range(AccountNumber::new("2"), AccountNumber::new("1"));
        assert!(matches!(
            validate_query(&query),
            Err(QueryError::InvalidAccountRange { .. })
        ));
    }

    #[test]
    fn test_comparative_needs_final_period() {
        let mut query = valid_query();
        query.report_type = ReportType::Comparative;
        assert!(matches!(
            validate_query(&query),
            Err(QueryError::MissingFinalPeriod)
        ));

        let query = query.with_final_period(BalancesPeriod::new(
            date(2025, 2, 1),
            date(2025, 2, 28),
        ));
        assert!(validate_query(&query).is_ok());
    }

    #[test]
    fn test_consolidation_needs_valuation() {
        let mut query = valid_query();
        query.consolidate_to_target_currency = true;
        assert!(matches!(
            validate_query(&query),
            Err(QueryError::ConsolidationWithoutValuation)
        ));

        query.initial_period = query.initial_period.clone().with_valuation(
            ExchangeRateTypeId::new(),
            Currency::Mxn,
            date(2025, 1, 31),
        );
        assert!(validate_query(&query).is_ok());
    }

    #[test]
    fn test_default_valuation_needs_rate_type() {
        let mut query = valid_query();
        query.initial_period.use_default_valuation = true;
        assert!(matches!(
            validate_query(&query),
            Err(QueryError::MissingRateType)
        ));
    }
}

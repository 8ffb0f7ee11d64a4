//! Engine error types.
//!
//! Every fatal error aborts the whole build for its query; there is no
//! partial-report degradation mode. Report assemblers never catch engine
//! errors, they propagate them to the caller.

use chrono::NaiveDate;
use thiserror::Error;

use balanza_shared::types::Currency;
use balanza_shared::AppError;

use crate::chart::AccountNumber;
use crate::query::QueryError;

/// Errors that can occur while building a trial balance.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No registered rate for a required (currency, type, date) triple.
    /// Names the offending account and currency; the engine never silently
    /// defaults a missing rate to 1.
    #[error("No exchange rate registered for account {account} in {currency} on {date}")]
    MissingExchangeRate {
        /// Account whose balance needed the rate.
        account: AccountNumber,
        /// Currency without a registered rate.
        currency: Currency,
        /// As-of date of the lookup.
        date: NaiveDate,
    },

    /// The query was rejected before the pipeline ran.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The balance or rate source failed.
    #[error(transparent)]
    Source(#[from] AppError),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::MissingExchangeRate { .. } => Self::BusinessRule(err.to_string()),
            EngineError::Query(query) => Self::Validation(query.to_string()),
            EngineError::Source(source) => source,
        }
    }
}

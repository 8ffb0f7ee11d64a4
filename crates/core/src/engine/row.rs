//! Raw balance rows and the source contract.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use balanza_shared::types::{AccountsChartId, Currency, SubledgerAccountId};
use balanza_shared::AppResult;

use crate::chart::{AccountNumber, AccountRole, DebtorCreditor};
use crate::query::{BalancesPeriod, TrialBalanceQuery};

/// One raw, unaggregated balance row from the source: a single
/// ledger x currency x account x sector x subledger combination.
///
/// Immutable once read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRow {
    /// Ledger number ("01").
    pub ledger: String,
    /// Currency of the balance.
    pub currency: Currency,
    /// Standard account number.
    pub account: AccountNumber,
    /// Posting role of the account.
    pub role: AccountRole,
    /// Debtor/creditor nature of the account.
    pub nature: DebtorCreditor,
    /// Sector code ("00").
    pub sector: String,
    /// Subledger account, when the row carries subledger detail.
    pub subledger_id: Option<SubledgerAccountId>,
    /// Subledger number ("00123").
    pub subledger_number: Option<String>,
    /// Balance at the start of the period.
    pub initial_balance: Decimal,
    /// Total debits in the period.
    pub debit: Decimal,
    /// Total credits in the period.
    pub credit: Decimal,
    /// Date of the last movement on this row.
    pub last_change_date: NaiveDate,
}

/// What the engine asks the balance source for.
///
/// The source maps these filters onto its own query clauses; the engine
/// does not re-filter the rows it gets back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowsRequest {
    /// Chart of accounts the rows belong to.
    pub accounts_chart_id: AccountsChartId,
    /// Period start date.
    pub from_date: NaiveDate,
    /// Period end date.
    pub to_date: NaiveDate,
    /// First account of the range filter.
    pub from_account: Option<AccountNumber>,
    /// Last account of the range filter.
    pub to_account: Option<AccountNumber>,
    /// Ledger filter; empty = all.
    pub ledgers: Vec<String>,
    /// Currency filter; empty = all.
    pub currencies: Vec<Currency>,
    /// Sector filter.
    pub sector: Option<String>,
}

impl RowsRequest {
    /// Builds the request for one period of a query.
    #[must_use]
    pub fn for_period(query: &TrialBalanceQuery, period: &BalancesPeriod) -> Self {
        Self {
            accounts_chart_id: query.accounts_chart_id,
            from_date: period.from_date,
            to_date: period.to_date,
            from_account: query.from_account.clone(),
            to_account: query.to_account.clone(),
            ledgers: query.ledgers.clone(),
            currencies: query.currencies.clone(),
            sector: query.sector.clone(),
        }
    }
}

/// Source of raw balance rows for a date range.
///
/// Rows are read-only snapshots, so independent report builds may run
/// concurrently against the same source.
pub trait BalanceSource: Sync {
    /// Returns the flat rows matching the request. An empty result is a
    /// valid "no activity in this period" answer, not an error.
    fn rows(&self, request: &RowsRequest) -> AppResult<Vec<BalanceRow>>;
}

//! Cascading-ledger assembler.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{EngineError, ItemType, TrialBalanceEngine, TrialBalanceEntry};
use crate::query::TrialBalanceQuery;

use super::table::{ReportColumn, ReportTable};

/// One row of the per-ledger report.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeEntry {
    /// Hierarchy level of the row.
    pub item_type: ItemType,
    /// Ledger number.
    pub ledger: String,
    /// Ledger name resolved from the chart.
    pub ledger_name: String,
    /// Currency code of the balance.
    pub currency_code: String,
    /// Account number, or the group label on group/total rows.
    pub account: String,
    /// Balance at the start of the period.
    pub initial_balance: Decimal,
    /// Total debits in the period.
    pub debit: Decimal,
    /// Total credits in the period.
    pub credit: Decimal,
    /// Closing balance.
    pub current_balance: Decimal,
    /// Date of the last movement rolled into this row.
    pub last_change_date: NaiveDate,
}

/// Keeps the per-ledger breakdown instead of collapsing to one
/// consolidated row set.
pub struct CascadeAssembler;

impl CascadeAssembler {
    /// Runs the engine with cascading forced on and labels each row with
    /// its ledger.
    pub fn build(
        engine: &TrialBalanceEngine<'_>,
        query: &TrialBalanceQuery,
    ) -> Result<ReportTable<CascadeEntry>, EngineError> {
        let mut cascading = query.clone();
        cascading.show_cascade_balances = true;
        let entries = engine.build(&cascading)?;
        let rows = entries
            .into_iter()
            .map(|entry| Self::shape(engine, entry))
            .collect();
        Ok(ReportTable::new(query.clone(), Self::columns(), rows))
    }

    fn shape(engine: &TrialBalanceEngine<'_>, entry: TrialBalanceEntry) -> CascadeEntry {
        let ledger_name = engine
            .chart()
            .ledger(&entry.ledger)
            .map(|ledger| ledger.name.clone())
            .unwrap_or_default();
        let account = if entry.account.as_str().is_empty() {
            entry.group_name.clone().unwrap_or_default()
        } else {
            entry.account.to_string()
        };
        CascadeEntry {
            item_type: entry.item_type,
            ledger: entry.ledger,
            ledger_name,
            currency_code: entry.currency.code().to_string(),
            account,
            initial_balance: entry.initial_balance,
            debit: entry.debit,
            credit: entry.credit,
            current_balance: entry.current_balance,
            last_change_date: entry.last_change_date,
        }
    }

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::text("ledger", "Ledger"),
            ReportColumn::text("ledger_name", "Ledger name"),
            ReportColumn::text("currency_code", "Currency"),
            ReportColumn::text("account", "Account"),
            ReportColumn::decimal("initial_balance", "Initial balance"),
            ReportColumn::decimal("debit", "Debit"),
            ReportColumn::decimal("credit", "Credit"),
            ReportColumn::decimal("current_balance", "Current balance"),
            ReportColumn::date("last_change_date", "Last change"),
        ]
    }
}

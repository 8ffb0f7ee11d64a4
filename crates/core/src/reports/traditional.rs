//! Traditional trial balance assembler.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{EngineError, ItemType, TrialBalanceEngine, TrialBalanceEntry};
use crate::query::TrialBalanceQuery;

use super::table::{ReportColumn, ReportTable};

/// One row of the traditional report.
#[derive(Debug, Clone, Serialize)]
pub struct TraditionalEntry {
    /// Hierarchy level of the row.
    pub item_type: ItemType,
    /// Ledger number.
    pub ledger: String,
    /// Currency code of the balance.
    pub currency_code: String,
    /// Account number, or the group label on group/total rows.
    pub account: String,
    /// Account name resolved from the chart.
    pub account_name: String,
    /// Sector code, when the row carries one.
    pub sector: Option<String>,
    /// Subledger number, on subledger-detail rows.
    pub subledger_number: Option<String>,
    /// Balance at the start of the period.
    pub initial_balance: Decimal,
    /// Total debits in the period.
    pub debit: Decimal,
    /// Total credits in the period.
    pub credit: Decimal,
    /// Closing balance.
    pub current_balance: Decimal,
    /// Valuation rate applied, 1 when no valuation ran.
    pub exchange_rate: Decimal,
    /// Time-weighted average balance, when requested.
    pub average_balance: Option<Decimal>,
    /// Date of the last movement rolled into this row.
    pub last_change_date: NaiveDate,
}

/// Builds the traditional report: the engine's entries relabeled with
/// chart names, one row per node, in the engine's emission order.
pub struct TraditionalAssembler;

impl TraditionalAssembler {
    /// Runs the engine and shapes its output.
    pub fn build(
        engine: &TrialBalanceEngine<'_>,
        query: &TrialBalanceQuery,
    ) -> Result<ReportTable<TraditionalEntry>, EngineError> {
        let entries = engine.build(query)?;
        let rows = entries
            .into_iter()
            .map(|entry| Self::shape(engine, entry))
            .collect();
        Ok(ReportTable::new(
            query.clone(),
            Self::columns(query.with_average_balance),
            rows,
        ))
    }

    fn shape(engine: &TrialBalanceEngine<'_>, entry: TrialBalanceEntry) -> TraditionalEntry {
        let account_name = match entry.item_type {
            ItemType::Entry | ItemType::Summary => engine
                .chart()
                .account(&entry.account)
                .map(|account| account.name.clone())
                .unwrap_or_default(),
            _ => entry.group_name.clone().unwrap_or_default(),
        };
        let account = if entry.account.as_str().is_empty() {
            entry.group_number.clone().unwrap_or_default()
        } else {
            entry.account.to_string()
        };
        TraditionalEntry {
            item_type: entry.item_type,
            ledger: entry.ledger,
            currency_code: entry.currency.code().to_string(),
            account,
            account_name,
            sector: entry.sector,
            subledger_number: entry.subledger_number,
            initial_balance: entry.initial_balance,
            debit: entry.debit,
            credit: entry.credit,
            current_balance: entry.current_balance,
            exchange_rate: entry.exchange_rate,
            average_balance: entry.average_balance,
            last_change_date: entry.last_change_date,
        }
    }

    fn columns(with_average: bool) -> Vec<ReportColumn> {
        let mut columns = vec![
            ReportColumn::text("ledger", "Ledger"),
            ReportColumn::text("currency_code", "Currency"),
            ReportColumn::text("account", "Account"),
            ReportColumn::text("account_name", "Name"),
            ReportColumn::decimal("initial_balance", "Initial balance"),
            ReportColumn::decimal("debit", "Debit"),
            ReportColumn::decimal("credit", "Credit"),
            ReportColumn::decimal("current_balance", "Current balance"),
        ];
        if with_average {
            columns.push(ReportColumn::decimal("average_balance", "Average balance"));
        }
        columns.push(ReportColumn::date("last_change_date", "Last change"));
        columns
    }
}

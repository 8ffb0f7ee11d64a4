//! Analytic-by-account assembler.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::chart::{AccountNumber, DebtorCreditor};
use crate::engine::{EngineError, ItemType, TrialBalanceEngine};
use crate::exchange::conversion::round_balance;
use crate::query::TrialBalanceQuery;

use super::table::{ReportColumn, ReportTable};

/// One account row with its balance split by currency origin.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticEntry {
    /// Ledger number.
    pub ledger: String,
    /// Account number.
    pub account: AccountNumber,
    /// Account name resolved from the chart.
    pub account_name: String,
    /// Debtor/creditor nature.
    pub nature: DebtorCreditor,
    /// Balance held in the domestic currency.
    pub domestic_balance: Decimal,
    /// Valorized balance held in foreign currencies.
    pub foreign_balance: Decimal,
    /// Domestic plus foreign.
    pub total_balance: Decimal,
}

/// Splits each account's total into domestic and foreign components,
/// keeping the rollup hierarchy. Foreign balances are expressed in the
/// domestic currency through the rate the engine recorded on the node.
pub struct AnalyticAssembler;

impl AnalyticAssembler {
    /// Runs the engine and folds its summary nodes per (ledger, account).
    pub fn build(
        engine: &TrialBalanceEngine<'_>,
        query: &TrialBalanceQuery,
    ) -> Result<ReportTable<AnalyticEntry>, EngineError> {
        let domestic = engine.config().domestic_currency;
        let entries = engine.build(query)?;

        let mut rows: std::collections::BTreeMap<(String, AccountNumber), AnalyticEntry> =
            std::collections::BTreeMap::new();
        for entry in entries
            .into_iter()
            .filter(|entry| entry.item_type == ItemType::Summary)
        {
            let key = (entry.ledger.clone(), entry.account.clone());
            let row = rows.entry(key).or_insert_with(|| AnalyticEntry {
                ledger: entry.ledger.clone(),
                account: entry.account.clone(),
                account_name: engine
                    .chart()
                    .account(&entry.account)
                    .map(|account| account.name.clone())
                    .unwrap_or_default(),
                nature: entry.nature,
                domestic_balance: Decimal::ZERO,
                foreign_balance: Decimal::ZERO,
                total_balance: Decimal::ZERO,
            });
            if entry.currency == domestic {
                row.domestic_balance += entry.current_balance;
            } else {
                row.foreign_balance += round_balance(entry.current_balance * entry.exchange_rate);
            }
        }

        let rows = rows
            .into_values()
            .map(|mut row| {
                row.total_balance = row.domestic_balance + row.foreign_balance;
                row
            })
            .collect();
        Ok(ReportTable::new(query.clone(), Self::columns(), rows))
    }

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::text("ledger", "Ledger"),
            ReportColumn::text("account", "Account"),
            ReportColumn::text("account_name", "Name"),
            ReportColumn::decimal("domestic_balance", "Domestic balance"),
            ReportColumn::decimal("foreign_balance", "Foreign balance"),
            ReportColumn::decimal("total_balance", "Total balance"),
        ]
    }
}

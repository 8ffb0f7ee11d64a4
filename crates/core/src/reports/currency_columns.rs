//! Columnar-by-currency assembler.

use std::collections::BTreeMap;

use serde::Serialize;

use balanza_shared::types::{Currency, CurrencyBalances};

use crate::chart::{AccountNumber, DebtorCreditor};
use crate::engine::{EngineError, ItemType, TrialBalanceEngine};
use crate::query::TrialBalanceQuery;

use super::table::{ReportColumn, ReportTable};

/// One account row pivoted into a fixed set of per-currency columns.
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyColumnsEntry {
    /// Ledger number.
    pub ledger: String,
    /// Account number.
    pub account: AccountNumber,
    /// Account name resolved from the chart.
    pub account_name: String,
    /// Debtor/creditor nature.
    pub nature: DebtorCreditor,
    /// Closing balance per currency; zero where the account holds none.
    pub balances: CurrencyBalances,
}

/// Pivots the engine's per-currency summary nodes into one row per account
/// with a column per currency.
pub struct CurrencyColumnsAssembler;

impl CurrencyColumnsAssembler {
    /// Runs the engine and pivots its summary nodes.
    pub fn build(
        engine: &TrialBalanceEngine<'_>,
        query: &TrialBalanceQuery,
    ) -> Result<ReportTable<CurrencyColumnsEntry>, EngineError> {
        let entries = engine.build(query)?;

        let mut rows: BTreeMap<(String, AccountNumber), CurrencyColumnsEntry> = BTreeMap::new();
        for entry in entries
            .into_iter()
            .filter(|entry| entry.item_type == ItemType::Summary)
        {
            let key = (entry.ledger.clone(), entry.account.clone());
            let row = rows.entry(key).or_insert_with(|| CurrencyColumnsEntry {
                ledger: entry.ledger.clone(),
                account: entry.account.clone(),
                account_name: engine
                    .chart()
                    .account(&entry.account)
                    .map(|account| account.name.clone())
                    .unwrap_or_default(),
                nature: entry.nature,
                balances: CurrencyBalances::default(),
            });
            row.balances.add(entry.currency, entry.current_balance);
        }

        Ok(ReportTable::new(
            query.clone(),
            Self::columns(),
            rows.into_values().collect(),
        ))
    }

    fn columns() -> Vec<ReportColumn> {
        let mut columns = vec![
            ReportColumn::text("ledger", "Ledger"),
            ReportColumn::text("account", "Account"),
            ReportColumn::text("account_name", "Name"),
        ];
        for currency in Currency::ALL {
            columns.push(ReportColumn::decimal(
                &format!("balances.{}", currency.to_string().to_lowercase()),
                &currency.to_string(),
            ));
        }
        columns
    }
}

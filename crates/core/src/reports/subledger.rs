//! By-subledger assembler.

use std::collections::BTreeMap;

use balanza_shared::types::Currency;

use crate::chart::AccountRole;
use crate::engine::{EngineError, ItemType, TrialBalanceEngine, TrialBalanceEntry};
use crate::query::TrialBalanceQuery;

use super::table::{ReportColumn, ReportTable};

/// Label prefix of the synthesized per-subledger total node.
pub const SUBLEDGER_TOTAL_PREFIX: &str = "TOTAL DEL AUXILIAR";

/// Re-groups leaf entries by subledger account identity across ledgers and
/// sectors, closing each group with a synthesized `Total` node.
pub struct SubledgerAssembler;

impl SubledgerAssembler {
    /// Runs the engine with subledger detail forced on and regroups its
    /// leaf entries per subledger number.
    pub fn build(
        engine: &TrialBalanceEngine<'_>,
        query: &TrialBalanceQuery,
    ) -> Result<ReportTable<TrialBalanceEntry>, EngineError> {
        let mut detailed = query.clone();
        detailed.with_subledger_account = true;
        let entries = engine.build(&detailed)?;

        // Grouped across ledgers and sectors but never across currencies;
        // one total per subledger and currency.
        let mut groups: BTreeMap<(String, Currency), Vec<TrialBalanceEntry>> = BTreeMap::new();
        for entry in entries
            .into_iter()
            .filter(|entry| entry.item_type == ItemType::Entry)
        {
            let Some(number) = entry.subledger_number.clone() else {
                continue;
            };
            groups.entry((number, entry.currency)).or_default().push(entry);
        }

        let mut rows = Vec::new();
        for ((number, _currency), children) in groups {
            let mut total = TrialBalanceEntry::synthesized(
                ItemType::Total,
                children[0].ledger.clone(),
                children[0].currency,
                children[0].account.clone(),
                AccountRole::Control,
                children[0].nature,
                children[0].last_change_date,
            );
            total.group_number = Some(number.clone());
            total.group_name = Some(format!("{SUBLEDGER_TOTAL_PREFIX}: {number}"));
            for child in &children {
                // absorb keeps the maximum last_change_date of the children
                total.absorb(child);
            }
            rows.extend(children);
            rows.push(total);
        }

        Ok(ReportTable::new(query.clone(), Self::columns(), rows))
    }

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::text("subledger_number", "Subledger"),
            ReportColumn::text("ledger", "Ledger"),
            ReportColumn::text("account", "Account"),
            ReportColumn::decimal("initial_balance", "Initial balance"),
            ReportColumn::decimal("debit", "Debit"),
            ReportColumn::decimal("credit", "Credit"),
            ReportColumn::decimal("current_balance", "Current balance"),
            ReportColumn::date("last_change_date", "Last change"),
        ]
    }
}

//! Property-based tests for the rollup stage.

use proptest::prelude::*;
use rust_decimal::Decimal;

use balanza_shared::types::{AccountsChartId, Currency};
use balanza_shared::ReportingConfig;

use crate::chart::DebtorCreditor;
use crate::query::{BalancesPeriod, ReportType, TrialBalanceQuery};
use crate::testkit::{date, row, sample_chart, InMemoryRates, InMemorySource};

use super::{BalanceRow, ItemType, TrialBalanceEngine, TrialBalanceEntry};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn leaf_strategy() -> impl Strategy<Value = BalanceRow> {
    (
        prop::sample::select(vec!["1.01.01", "1.01.02", "2.01.01"]),
        prop::sample::select(vec!["00", "01", "02"]),
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
        1u32..=28,
    )
        .prop_map(|(account, sector, initial, debit, credit, day)| {
            let nature = if account.starts_with('1') {
                DebtorCreditor::Debtor
            } else {
                DebtorCreditor::Creditor
            };
            row(
                "01",
                Currency::Mxn,
                account,
                nature,
                sector,
                initial,
                debit,
                credit,
                date(2025, 1, day),
            )
        })
}

fn build(rows: Vec<BalanceRow>) -> Vec<TrialBalanceEntry> {
    let source = InMemorySource { rows };
    let rates = InMemoryRates { rates: Vec::new() };
    let chart = sample_chart();
    let config = ReportingConfig::default();
    let engine = TrialBalanceEngine::new(&source, &rates, &chart, &config);
    let query = TrialBalanceQuery::new(
        ReportType::Traditional,
        AccountsChartId::new(),
        BalancesPeriod::new(date(2025, 1, 1), date(2025, 1, 31)),
    );
    engine.build(&query).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any batch of leaf rows, every summary node's current balance
    /// equals the sum over the entry rows that roll into it, within one
    /// whole unit of rounding tolerance.
    #[test]
    fn prop_rollup_conserves_balances(rows in prop::collection::vec(leaf_strategy(), 1..40)) {
        let entries = build(rows);
        let tolerance = Decimal::ONE;

        for summary in entries.iter().filter(|e| e.item_type == ItemType::Summary) {
            let detail: Decimal = entries
                .iter()
                .filter(|e| e.item_type == ItemType::Entry)
                .filter(|e| {
                    e.currency == summary.currency
                        && (e.account == summary.account
                            || summary.account.is_ancestor_of(&e.account))
                })
                .map(|e| e.current_balance)
                .sum();
            prop_assert!(
                (summary.current_balance - detail).abs() <= tolerance,
                "summary {} = {}, detail sum = {}",
                summary.account,
                summary.current_balance,
                detail
            );
        }
    }

    /// The group node equals the sum of all entry rows in its partition.
    #[test]
    fn prop_group_equals_leaf_sum(rows in prop::collection::vec(leaf_strategy(), 1..40)) {
        let entries = build(rows);
        let leaf_sum: Decimal = entries
            .iter()
            .filter(|e| e.item_type == ItemType::Entry)
            .map(|e| e.current_balance)
            .sum();
        let group = entries.iter().find(|e| e.item_type == ItemType::Group).unwrap();
        prop_assert!((group.current_balance - leaf_sum).abs() <= Decimal::ONE);
    }

    /// Every entry row appears before any summary of one of its ancestors.
    #[test]
    fn prop_entries_precede_ancestor_summaries(
        rows in prop::collection::vec(leaf_strategy(), 1..25),
    ) {
        let entries = build(rows);
        for (idx, entry) in entries.iter().enumerate() {
            if entry.item_type != ItemType::Entry {
                continue;
            }
            let summary_pos = entries.iter().position(|e| {
                e.item_type == ItemType::Summary
                    && (e.account == entry.account || e.account.is_ancestor_of(&entry.account))
            });
            if let Some(pos) = summary_pos {
                prop_assert!(pos > idx, "summary at {pos} before entry at {idx}");
            }
        }
    }
}

//! The trial balance aggregation pipeline.
//!
//! `build` runs the stages in order: fetch, leaf classification, valuation,
//! hierarchical rollup, average balances, rounding, level restriction.
//! Balances are rounded once at the end, never mid-computation, so rounding
//! error does not compound across rollup levels.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use balanza_shared::ReportingConfig;

use crate::chart::{AccountNumber, AccountRole, AccountsChart};
use crate::exchange::{ExchangeRateSource, RateTable};
use crate::query::{validation::validate_query, BalancesPeriod, BalancesType, TrialBalanceQuery, ValuationPass};

use super::entry::{EntryKey, GroupKey, ItemType, SummaryKey, TrialBalanceEntry};
use super::error::EngineError;
use super::row::{BalanceSource, RowsRequest};

/// Ledger number carried by nodes consolidated across ledgers.
pub const CONSOLIDATED_LEDGER: &str = "00";

/// The trial balance aggregation engine.
///
/// Holds references to the external collaborators, resolved once per build:
/// the raw-row source, the exchange-rate source, and the chart catalog.
pub struct TrialBalanceEngine<'a> {
    source: &'a dyn BalanceSource,
    rates: &'a dyn ExchangeRateSource,
    chart: &'a AccountsChart,
    config: &'a ReportingConfig,
}

impl<'a> TrialBalanceEngine<'a> {
    /// Creates an engine over the given collaborators.
    #[must_use]
    pub const fn new(
        source: &'a dyn BalanceSource,
        rates: &'a dyn ExchangeRateSource,
        chart: &'a AccountsChart,
        config: &'a ReportingConfig,
    ) -> Self {
        Self {
            source,
            rates,
            chart,
            config,
        }
    }

    /// The chart catalog this engine resolves reference data against.
    #[must_use]
    pub const fn chart(&self) -> &AccountsChart {
        self.chart
    }

    /// The reporting configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &ReportingConfig {
        self.config
    }

    /// Validates the query and builds the ordered, rolled-up entry list
    /// for its initial period.
    pub fn build(
        &self,
        query: &TrialBalanceQuery,
    ) -> Result<Vec<TrialBalanceEntry>, EngineError> {
        validate_query(query)?;
        self.build_period(query, ValuationPass::First)
    }

    /// Runs one full pipeline pass over the period the pass selects.
    ///
    /// An empty raw-row result is not an error; it produces an empty entry
    /// list ("no activity in this period").
    pub fn build_period(
        &self,
        query: &TrialBalanceQuery,
        pass: ValuationPass,
    ) -> Result<Vec<TrialBalanceEntry>, EngineError> {
        let period = query.period(pass);
        let request = RowsRequest::for_period(query, period);
        let rows = self.source.rows(&request)?;
        debug!(rows = rows.len(), ?pass, "fetched balance rows");
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut leaves = classify_rows(rows, query.balances_type);
        debug!(leaves = leaves.len(), "classified leaf entries");

        if period.valuation_requested() {
            self.valuate(&mut leaves, query, period, pass)?;
        }

        let mut entries = rollup(leaves, query, self.chart);

        if query.with_average_balance {
            // The period length is the day count of the *initial* period's
            // end date even on the second pass.
            let period_length = Decimal::from(query.initial_period.to_date.day());
            attach_average_balances(&mut entries, period.to_date, period_length);
        }

        for entry in &mut entries {
            entry.round();
        }

        if let Some(max_level) = query.max_level {
            restrict_level(&mut entries, max_level);
        }

        debug!(entries = entries.len(), "build complete");
        Ok(entries)
    }

    /// Valuation stage: resolves one rate per foreign currency and records
    /// it on the pass's exchange-rate field. A missing rate is fatal to the
    /// whole build.
    fn valuate(
        &self,
        leaves: &mut [TrialBalanceEntry],
        query: &TrialBalanceQuery,
        period: &BalancesPeriod,
        pass: ValuationPass,
    ) -> Result<(), EngineError> {
        let Some(rate_type) = period.exchange_rate_type else {
            return Ok(());
        };
        let target = period.valuation_target(self.config.domestic_currency);
        let date = period.rate_date();
        let table = RateTable::load(self.rates, rate_type, target, date)?;
        debug!(%target, %date, "loaded rate table");

        for entry in leaves.iter_mut() {
            let rate =
                table
                    .rate_for(entry.currency)
                    .ok_or_else(|| EngineError::MissingExchangeRate {
                        account: entry.account.clone(),
                        currency: entry.currency,
                        date,
                    })?;
            match pass {
                ValuationPass::First => entry.exchange_rate = rate,
                ValuationPass::Second => entry.second_exchange_rate = rate,
            }
            if query.consolidate_to_target_currency && entry.currency != target {
                entry.apply_rate(rate);
                entry.currency = target;
            }
        }
        Ok(())
    }
}

/// Leaf classification: raw rows become `Entry` nodes. All-zero rows are
/// dropped unless the query asks for every account.
fn classify_rows(
    rows: Vec<super::row::BalanceRow>,
    balances_type: BalancesType,
) -> Vec<TrialBalanceEntry> {
    rows.into_iter()
        .map(TrialBalanceEntry::from_row)
        .filter(|entry| balances_type == BalancesType::AllAccounts || !entry.is_empty_row())
        .collect()
}

/// Hierarchical rollup: folds leaves, accumulates summary nodes for every
/// account and its chart ancestors, group nodes per ledger-and-currency,
/// and consolidated totals per ledger, then emits them in report order.
fn rollup(
    leaves: Vec<TrialBalanceEntry>,
    query: &TrialBalanceQuery,
    chart: &AccountsChart,
) -> Vec<TrialBalanceEntry> {
    // Fold leaves into their composite keys. Consolidating across ledgers
    // and pre-aggregating subledger detail both happen here, by re-tagging
    // the leaf before insertion.
    let mut folded: BTreeMap<EntryKey, TrialBalanceEntry> = BTreeMap::new();
    for mut leaf in leaves {
        if !query.show_cascade_balances {
            leaf.ledger = CONSOLIDATED_LEDGER.to_string();
        }
        if !query.with_subledger_account {
            leaf.parent_subledger = leaf.subledger_id.take();
            leaf.subledger_number = None;
        }
        match folded.entry(leaf.key()) {
            std::collections::btree_map::Entry::Occupied(mut slot) => slot.get_mut().absorb(&leaf),
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(leaf);
            }
        }
    }

    let mut summaries: BTreeMap<SummaryKey, TrialBalanceEntry> = BTreeMap::new();
    let mut groups: BTreeMap<GroupKey, TrialBalanceEntry> = BTreeMap::new();
    for leaf in folded.values() {
        let mut lineage = vec![leaf.account.clone()];
        lineage.extend(leaf.account.ancestors());
        for account in lineage {
            let key = SummaryKey {
                ledger: leaf.ledger.clone(),
                currency: leaf.currency,
                account: account.clone(),
            };
            let summary = summaries.entry(key).or_insert_with(|| {
                let role = chart.role_of(&account);
                let nature = chart.nature_of(&account, leaf.nature);
                let mut node = TrialBalanceEntry::synthesized(
                    ItemType::Summary,
                    leaf.ledger.clone(),
                    leaf.currency,
                    account.clone(),
                    role,
                    nature,
                    leaf.last_change_date,
                );
                node.is_parent_posting_entry = role == AccountRole::Control;
                node.exchange_rate = leaf.exchange_rate;
                node.second_exchange_rate = leaf.second_exchange_rate;
                node
            });
            summary.absorb(leaf);
            reconcile_rates(summary, leaf);
        }

        let group_key = GroupKey {
            ledger: leaf.ledger.clone(),
            currency: leaf.currency,
        };
        let group = groups.entry(group_key).or_insert_with(|| {
            let mut node = TrialBalanceEntry::synthesized(
                ItemType::Group,
                leaf.ledger.clone(),
                leaf.currency,
                AccountNumber::new(""),
                AccountRole::Control,
                leaf.nature,
                leaf.last_change_date,
            );
            node.group_number = Some(leaf.currency.code().to_string());
            node.group_name = Some(format!("TOTAL MONEDA {}", leaf.currency));
            node.exchange_rate = leaf.exchange_rate;
            node.second_exchange_rate = leaf.second_exchange_rate;
            node
        });
        group.absorb(leaf);
        reconcile_rates(group, leaf);
    }

    let mut totals: BTreeMap<String, TrialBalanceEntry> = BTreeMap::new();
    if query.consolidate_to_target_currency {
        for group in groups.values() {
            let total = totals.entry(group.ledger.clone()).or_insert_with(|| {
                let mut node = TrialBalanceEntry::synthesized(
                    ItemType::BalanceTotalConsolidated,
                    group.ledger.clone(),
                    group.currency,
                    AccountNumber::new(""),
                    AccountRole::Control,
                    group.nature,
                    group.last_change_date,
                );
                node.group_number = Some(group.ledger.clone());
                node.group_name = Some("TOTAL CONSOLIDADO".to_string());
                node
            });
            total.absorb(group);
        }
    }

    emit(folded, summaries, groups, totals)
}

/// Emission order: leaf entries first (already sorted by their composite
/// key), each ancestor summary immediately after the last descendant that
/// belongs to it (depth-first), then the ledger-and-currency group, then
/// the consolidated totals. The exporters rely on this order positionally.
fn emit(
    folded: BTreeMap<EntryKey, TrialBalanceEntry>,
    mut summaries: BTreeMap<SummaryKey, TrialBalanceEntry>,
    mut groups: BTreeMap<GroupKey, TrialBalanceEntry>,
    totals: BTreeMap<String, TrialBalanceEntry>,
) -> Vec<TrialBalanceEntry> {
    let mut out =
        Vec::with_capacity(folded.len() + summaries.len() + groups.len() + totals.len());

    let mut partitions: BTreeMap<GroupKey, Vec<TrialBalanceEntry>> = BTreeMap::new();
    for leaf in folded.into_values() {
        let key = GroupKey {
            ledger: leaf.ledger.clone(),
            currency: leaf.currency,
        };
        partitions.entry(key).or_default().push(leaf);
    }

    for (partition, leaves) in partitions {
        let mut open: Vec<AccountNumber> = Vec::new();
        let mut previous: Option<AccountNumber> = None;

        for leaf in leaves {
            if previous.as_ref() != Some(&leaf.account) {
                if let Some(done) = previous.take() {
                    if done.is_ancestor_of(&leaf.account) {
                        // its summary stays open until the subtree closes
                        open.push(done);
                    } else {
                        emit_summary(&mut out, &mut summaries, &partition, &done);
                        while let Some(top) = open.last() {
                            if top.is_ancestor_of(&leaf.account) {
                                break;
                            }
                            emit_summary(&mut out, &mut summaries, &partition, top);
                            open.pop();
                        }
                    }
                }
                for ancestor in leaf.account.ancestors() {
                    if !open.contains(&ancestor) {
                        open.push(ancestor);
                    }
                }
                previous = Some(leaf.account.clone());
            }
            out.push(leaf);
        }

        if let Some(done) = previous {
            emit_summary(&mut out, &mut summaries, &partition, &done);
        }
        while let Some(top) = open.pop() {
            emit_summary(&mut out, &mut summaries, &partition, &top);
        }
        if let Some(group) = groups.remove(&partition) {
            out.push(group);
        }
    }

    out.extend(totals.into_values());
    out
}

/// Rate carried by a synthesized node. Leaves of one native currency all
/// share a rate, so it propagates as-is. Consolidation re-tags leaves of
/// different native currencies into the target currency; a node mixing
/// their rates falls back to 1, its balance already being target-valued.
fn reconcile_rates(node: &mut TrialBalanceEntry, leaf: &TrialBalanceEntry) {
    if node.exchange_rate != leaf.exchange_rate {
        node.exchange_rate = Decimal::ONE;
    }
    if node.second_exchange_rate != leaf.second_exchange_rate {
        node.second_exchange_rate = Decimal::ONE;
    }
}

fn emit_summary(
    out: &mut Vec<TrialBalanceEntry>,
    summaries: &mut BTreeMap<SummaryKey, TrialBalanceEntry>,
    partition: &GroupKey,
    account: &AccountNumber,
) {
    let key = SummaryKey {
        ledger: partition.ledger.clone(),
        currency: partition.currency,
        account: account.clone(),
    };
    if let Some(node) = summaries.remove(&key) {
        out.push(node);
    }
}

/// Average-balance stage.
///
/// `average = (days_remaining * net_movement) / period_length + initial`,
/// with the net movement signed by the account's nature. This approximates
/// a day-weighted average assuming the net movement occurred uniformly
/// after the last recorded change; it is not an exact day-by-day average.
fn attach_average_balances(
    entries: &mut [TrialBalanceEntry],
    to_date: NaiveDate,
    period_length: Decimal,
) {
    for entry in entries
        .iter_mut()
        .filter(|e| matches!(e.item_type, ItemType::Entry | ItemType::Summary))
    {
        let net_movement = entry.nature.net_movement(entry.debit, entry.credit);
        let days_remaining = Decimal::from((to_date - entry.last_change_date).num_days() + 1);
        entry.average_balance =
            Some((days_remaining * net_movement) / period_length + entry.initial_balance);
    }
}

/// Level restriction: drops entry and summary nodes deeper than the
/// requested level. Their balances were already folded into ancestors
/// during rollup, so no total changes.
fn restrict_level(entries: &mut Vec<TrialBalanceEntry>, max_level: u32) {
    entries.retain(|entry| {
        !matches!(entry.item_type, ItemType::Entry | ItemType::Summary)
            || entry.account.level() <= max_level
    });
}

//! Two-period comparative assembler.
//!
//! Runs the engine once per period, outer-joins the leaf entries on their
//! composite key, and decomposes the period-over-period variation into an
//! exchange-rate effect and a real-activity effect. The decomposition
//! `variation == variation_by_exchange_rate + real_variation` holds exactly
//! because all three fields derive arithmetically from the same rounded
//! valorizations.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use balanza_shared::types::Currency;

use crate::chart::{AccountNumber, DebtorCreditor};
use crate::engine::{EngineError, EntryKey, ItemType, TrialBalanceEngine, TrialBalanceEntry};
use crate::exchange::conversion::round_balance;
use crate::query::{validation::validate_query, TrialBalanceQuery, ValuationPass};

use super::table::{ReportColumn, ReportTable};

/// One merged row of the comparative report.
#[derive(Debug, Clone, Serialize)]
pub struct ComparativeEntry {
    /// Ledger number.
    pub ledger: String,
    /// Currency of the balance.
    pub currency: Currency,
    /// Debtor/creditor nature.
    pub nature: DebtorCreditor,
    /// Account number.
    pub account: AccountNumber,
    /// Sector code.
    pub sector: String,
    /// Subledger number, on subledger-detail rows.
    pub subledger_number: Option<String>,
    /// Closing balance of the initial period; zero when absent.
    pub first_total_balance: Decimal,
    /// Valuation rate of the initial period.
    pub first_exchange_rate: Decimal,
    /// Initial-period balance expressed in the valuation currency.
    pub first_valorization: Decimal,
    /// Closing balance of the final period; zero when absent.
    pub second_total_balance: Decimal,
    /// Valuation rate of the final period.
    pub second_exchange_rate: Decimal,
    /// Final-period balance expressed in the valuation currency.
    pub second_valorization: Decimal,
    /// Raw change in currency value between the two valorizations.
    pub variation: Decimal,
    /// Portion of the variation caused by the rate moving.
    pub variation_by_exchange_rate: Decimal,
    /// Portion of the variation caused by account activity.
    pub real_variation: Decimal,
}

/// One side of the outer join before the variation fields are derived.
#[derive(Debug, Clone, Copy)]
struct PeriodSide {
    total_balance: Decimal,
    exchange_rate: Decimal,
}

/// Builds the comparative report from two independent engine runs.
pub struct ComparativeAssembler;

impl ComparativeAssembler {
    /// Runs both periods (in parallel), merges, and derives the variation
    /// decomposition.
    pub fn build(
        engine: &TrialBalanceEngine<'_>,
        query: &TrialBalanceQuery,
    ) -> Result<ReportTable<ComparativeEntry>, EngineError> {
        validate_query(query)?;
        let (first, second) = rayon::join(
            || engine.build_period(query, ValuationPass::First),
            || engine.build_period(query, ValuationPass::Second),
        );
        let (first, second) = (first?, second?);

        // Per-currency rates of each pass; one rate per currency, so any
        // leaf of the currency carries it. Used to fill the rate of a side
        // a merged entry is absent from.
        let mut first_rates: HashMap<Currency, Decimal> = HashMap::new();
        let mut second_rates: HashMap<Currency, Decimal> = HashMap::new();

        let mut merged: BTreeMap<EntryKey, (Option<ComparativeLeaf>, Option<ComparativeLeaf>)> =
            BTreeMap::new();
        for leaf in leaves(first, ValuationPass::First) {
            first_rates.insert(leaf.key.currency, leaf.side.exchange_rate);
            let key = leaf.key.clone();
            merged.entry(key).or_default().0 = Some(leaf);
        }
        for leaf in leaves(second, ValuationPass::Second) {
            second_rates.insert(leaf.key.currency, leaf.side.exchange_rate);
            let key = leaf.key.clone();
            merged.entry(key).or_default().1 = Some(leaf);
        }

        let consolidated = query.consolidate_to_target_currency;
        let mut rows: Vec<ComparativeEntry> = merged
            .into_iter()
            .map(|(key, (first, second))| {
                let first_rate = rate_of(&first_rates, key.currency);
                let second_rate = rate_of(&second_rates, key.currency);
                Self::merge_row(key, first, second, first_rate, second_rate, consolidated)
            })
            .collect();
        rows.sort_by(|a, b| {
            (
                &a.ledger,
                a.currency.code(),
                Reverse(a.nature),
                &a.account,
                &a.sector,
                a.subledger_number.as_ref().map_or(0, String::len),
                &a.subledger_number,
            )
                .cmp(&(
                    &b.ledger,
                    b.currency.code(),
                    Reverse(b.nature),
                    &b.account,
                    &b.sector,
                    b.subledger_number.as_ref().map_or(0, String::len),
                    &b.subledger_number,
                ))
        });

        Ok(ReportTable::new(query.clone(), Self::columns(), rows))
    }

    fn merge_row(
        key: EntryKey,
        first: Option<ComparativeLeaf>,
        second: Option<ComparativeLeaf>,
        first_rate: Decimal,
        second_rate: Decimal,
        consolidated: bool,
    ) -> ComparativeEntry {
        // At least one side is always present; it supplies the nature.
        let nature = first
            .as_ref()
            .or(second.as_ref())
            .map_or(DebtorCreditor::Debtor, |leaf| leaf.nature);
        let first_side = first.map_or(
            PeriodSide {
                total_balance: Decimal::ZERO,
                exchange_rate: first_rate,
            },
            |leaf| leaf.side,
        );
        let second_side = second.map_or(
            PeriodSide {
                total_balance: Decimal::ZERO,
                exchange_rate: second_rate,
            },
            |leaf| leaf.side,
        );

        let first_valorization = round_balance(valorize(first_side, consolidated));
        let second_valorization = round_balance(valorize(second_side, consolidated));
        let variation = second_valorization - first_valorization;
        let variation_by_exchange_rate =
            round_balance(first_side.total_balance * second_side.exchange_rate)
                - first_valorization;
        let real_variation = variation - variation_by_exchange_rate;

        ComparativeEntry {
            ledger: key.ledger,
            currency: key.currency,
            nature,
            account: key.account,
            sector: key.sector,
            subledger_number: key.subledger,
            first_total_balance: first_side.total_balance,
            first_exchange_rate: first_side.exchange_rate,
            first_valorization,
            second_total_balance: second_side.total_balance,
            second_exchange_rate: second_side.exchange_rate,
            second_valorization,
            variation,
            variation_by_exchange_rate,
            real_variation,
        }
    }

    fn columns() -> Vec<ReportColumn> {
        vec![
            ReportColumn::text("ledger", "Ledger"),
            ReportColumn::text("currency", "Currency"),
            ReportColumn::text("account", "Account"),
            ReportColumn::decimal("first_total_balance", "Initial period balance"),
            ReportColumn::decimal("first_exchange_rate", "Initial rate"),
            ReportColumn::decimal("first_valorization", "Initial valorization"),
            ReportColumn::decimal("second_total_balance", "Final period balance"),
            ReportColumn::decimal("second_exchange_rate", "Final rate"),
            ReportColumn::decimal("second_valorization", "Final valorization"),
            ReportColumn::decimal("variation", "Variation"),
            ReportColumn::decimal("variation_by_exchange_rate", "Variation by rate"),
            ReportColumn::decimal("real_variation", "Real variation"),
        ]
    }
}

/// A leaf entry reduced to its join key, nature, and period-side numbers.
#[derive(Debug, Clone)]
struct ComparativeLeaf {
    key: EntryKey,
    nature: DebtorCreditor,
    side: PeriodSide,
}

/// Rate a pass resolved for a currency. Falls back to 1 when the pass saw
/// no leaf of that currency at all, which also covers non-valuated builds.
fn rate_of(rates: &HashMap<Currency, Decimal>, currency: Currency) -> Decimal {
    rates.get(&currency).copied().unwrap_or(Decimal::ONE)
}

fn leaves(
    entries: Vec<TrialBalanceEntry>,
    pass: ValuationPass,
) -> impl Iterator<Item = ComparativeLeaf> {
    entries
        .into_iter()
        .filter(|entry| entry.item_type == ItemType::Entry)
        .map(move |entry| ComparativeLeaf {
            key: entry.key(),
            nature: entry.nature,
            side: PeriodSide {
                total_balance: entry.current_balance,
                exchange_rate: match pass {
                    ValuationPass::First => entry.exchange_rate,
                    ValuationPass::Second => entry.second_exchange_rate,
                },
            },
        })
}

/// Balance expressed in the valuation currency. When the engine already
/// consolidated to the target currency the balance carries the rate, so it
/// is not applied a second time.
fn valorize(side: PeriodSide, consolidated: bool) -> Decimal {
    if consolidated {
        side.total_balance
    } else {
        side.total_balance * side.exchange_rate
    }
}

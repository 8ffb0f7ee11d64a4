//! In-memory collaborators and fixtures shared by the test modules.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use balanza_shared::types::{AccountsChartId, Currency, ExchangeRateTypeId};
use balanza_shared::AppResult;

use crate::chart::{
    AccountNumber, AccountRole, AccountsChart, DebtorCreditor, Ledger, Sector, StandardAccount,
};
use crate::engine::{BalanceRow, BalanceSource, RowsRequest};
use crate::exchange::{ExchangeRate, ExchangeRateSource};

/// Balance source backed by a plain vector, applying the request filters
/// the way the real source would.
pub(crate) struct InMemorySource {
    pub rows: Vec<BalanceRow>,
}

impl BalanceSource for InMemorySource {
    fn rows(&self, request: &RowsRequest) -> AppResult<Vec<BalanceRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| request.ledgers.is_empty() || request.ledgers.contains(&row.ledger))
            .filter(|row| {
                request.currencies.is_empty() || request.currencies.contains(&row.currency)
            })
            .filter(|row| {
                request
                    .sector
                    .as_ref()
                    .is_none_or(|sector| &row.sector == sector)
            })
            .filter(|row| {
                request
                    .from_account
                    .as_ref()
                    .is_none_or(|from| &row.account >= from)
            })
            .filter(|row| {
                request
                    .to_account
                    .as_ref()
                    .is_none_or(|to| row.account <= *to || to.is_ancestor_of(&row.account))
            })
            .filter(|row| row.last_change_date <= request.to_date)
            .cloned()
            .collect())
    }
}

/// Rate source backed by a plain vector.
pub(crate) struct InMemoryRates {
    pub rates: Vec<ExchangeRate>,
}

impl ExchangeRateSource for InMemoryRates {
    fn rates(
        &self,
        rate_type: ExchangeRateTypeId,
        as_of: NaiveDate,
    ) -> AppResult<Vec<ExchangeRate>> {
        Ok(self
            .rates
            .iter()
            .filter(|rate| rate.rate_type == rate_type && rate.effective_date == as_of)
            .cloned()
            .collect())
    }
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A small two-branch chart: assets under "1" (debtor), liabilities under
/// "2" (creditor).
pub(crate) fn sample_chart() -> AccountsChart {
    let mut chart = AccountsChart::new(AccountsChartId::new());
    let accounts = [
        ("1", "ACTIVO", AccountRole::Control, DebtorCreditor::Debtor),
        ("1.01", "DISPONIBILIDADES", AccountRole::Control, DebtorCreditor::Debtor),
        ("1.01.01", "CAJA", AccountRole::Posting, DebtorCreditor::Debtor),
        ("1.01.02", "BANCOS", AccountRole::Posting, DebtorCreditor::Debtor),
        ("2", "PASIVO", AccountRole::Control, DebtorCreditor::Creditor),
        ("2.01", "CAPTACION", AccountRole::Control, DebtorCreditor::Creditor),
        ("2.01.01", "DEPOSITOS", AccountRole::Posting, DebtorCreditor::Creditor),
    ];
    for (number, name, role, nature) in accounts {
        chart = chart.with_account(StandardAccount {
            number: AccountNumber::new(number),
            name: name.into(),
            role,
            nature,
        });
    }
    chart
        .with_ledger(Ledger {
            number: "01".into(),
            name: "Mayor central".into(),
        })
        .with_ledger(Ledger {
            number: "02".into(),
            name: "Mayor sucursales".into(),
        })
        .with_sector(Sector {
            code: "00".into(),
            name: "Sin sector".into(),
        })
}

/// Leaf row builder with fixture defaults.
#[allow(clippy::too_many_arguments)]
pub(crate) fn row(
    ledger: &str,
    currency: Currency,
    account: &str,
    nature: DebtorCreditor,
    sector: &str,
    initial: Decimal,
    debit: Decimal,
    credit: Decimal,
    last_change: NaiveDate,
) -> BalanceRow {
    BalanceRow {
        ledger: ledger.into(),
        currency,
        account: AccountNumber::new(account),
        role: AccountRole::Posting,
        nature,
        sector: sector.into(),
        subledger_id: None,
        subledger_number: None,
        initial_balance: initial,
        debit,
        credit,
        last_change_date: last_change,
    }
}

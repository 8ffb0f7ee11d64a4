//! Query domain types for report builds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use balanza_shared::types::{AccountsChartId, Currency, ExchangeRateTypeId};

use crate::chart::AccountNumber;

/// Report shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Traditional trial balance.
    Traditional,
    /// One column per currency (valorized balance).
    CurrencyColumns,
    /// Two-period comparative with variance decomposition.
    Comparative,
    /// Domestic/foreign split per account.
    AnalyticByAccount,
    /// Regrouped by subledger account.
    BySubledger,
    /// Per-ledger breakdown retained.
    CascadingLedger,
}

/// Which accounts a report includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalancesType {
    /// Every account, including rows with no movement and no balance.
    AllAccounts,
    /// Only accounts with movement or a balance in the period.
    WithMovement,
}

/// Which valuation pass a pipeline run belongs to.
///
/// Comparative reports run the engine twice; the pass determines which
/// exchange-rate field the resolved rate is recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuationPass {
    /// First (or only) period.
    First,
    /// Second period of a comparative report.
    Second,
}

/// A date range with optional valuation directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancesPeriod {
    /// Period start date.
    pub from_date: NaiveDate,
    /// Period end date.
    pub to_date: NaiveDate,
    /// Exchange-rate type used for valuation.
    pub exchange_rate_type: Option<ExchangeRateTypeId>,
    /// Currency foreign balances are valuated into.
    pub valuate_to_currency: Option<Currency>,
    /// As-of date for the exchange-rate lookup.
    pub exchange_rate_date: Option<NaiveDate>,
    /// Valuate with period defaults (end date, domestic target).
    pub use_default_valuation: bool,
}

impl BalancesPeriod {
    /// Creates a period with no valuation directives.
    #[must_use]
    pub const fn new(from_date: NaiveDate, to_date: NaiveDate) -> Self {
        Self {
            from_date,
            to_date,
            exchange_rate_type: None,
            valuate_to_currency: None,
            exchange_rate_date: None,
            use_default_valuation: false,
        }
    }

    /// Sets explicit valuation directives.
    #[must_use]
    pub const fn with_valuation(
        mut self,
        rate_type: ExchangeRateTypeId,
        to_currency: Currency,
        rate_date: NaiveDate,
    ) -> Self {
        self.exchange_rate_type = Some(rate_type);
        self.valuate_to_currency = Some(to_currency);
        self.exchange_rate_date = Some(rate_date);
        self
    }

    /// True if this period asks for a valuation pass.
    #[must_use]
    pub const fn valuation_requested(&self) -> bool {
        self.use_default_valuation || self.exchange_rate_type.is_some()
    }

    /// Target currency for valuation, defaulting to the domestic currency.
    #[must_use]
    pub fn valuation_target(&self, domestic: Currency) -> Currency {
        self.valuate_to_currency.unwrap_or(domestic)
    }

    /// As-of date for the exchange-rate lookup, defaulting to the period end.
    #[must_use]
    pub fn rate_date(&self) -> NaiveDate {
        self.exchange_rate_date.unwrap_or(self.to_date)
    }
}

/// The full user-specified request for a balance report.
///
/// Immutable after validation; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceQuery {
    /// Report shape selector.
    pub report_type: ReportType,
    /// Chart of accounts the balances belong to.
    pub accounts_chart_id: AccountsChartId,
    /// First account of the account range filter.
    pub from_account: Option<AccountNumber>,
    /// Last account of the account range filter.
    pub to_account: Option<AccountNumber>,
    /// Ledger filter; empty = all ledgers.
    pub ledgers: Vec<String>,
    /// Currency filter; empty = all currencies.
    pub currencies: Vec<Currency>,
    /// Sector filter.
    pub sector: Option<String>,
    /// Account inclusion rule.
    pub balances_type: BalancesType,
    /// Keep per-ledger breakdown instead of consolidating.
    pub show_cascade_balances: bool,
    /// Keep subledger-level detail.
    pub with_subledger_account: bool,
    /// Attach time-weighted average balances.
    pub with_average_balance: bool,
    /// Replace native-currency balances with target-currency values.
    pub consolidate_to_target_currency: bool,
    /// First (or only) report period.
    pub initial_period: BalancesPeriod,
    /// Second period for comparative reports.
    pub final_period: Option<BalancesPeriod>,
    /// Maximum account level to report; deeper nodes are dropped after
    /// their balances have been folded into ancestors.
    pub max_level: Option<u32>,
}

impl TrialBalanceQuery {
    /// Creates a query with default flags.
    #[must_use]
    pub fn new(
        report_type: ReportType,
        accounts_chart_id: AccountsChartId,
        initial_period: BalancesPeriod,
    ) -> Self {
        Self {
            report_type,
            accounts_chart_id,
            from_account: None,
            to_account: None,
            ledgers: Vec::new(),
            currencies: Vec::new(),
            sector: None,
            balances_type: BalancesType::WithMovement,
            show_cascade_balances: false,
            with_subledger_account: false,
            with_average_balance: false,
            consolidate_to_target_currency: false,
            initial_period,
            final_period: None,
            max_level: None,
        }
    }

    /// Restricts the account range.
    #[must_use]
    pub fn with_account_range(mut self, from: AccountNumber, to: AccountNumber) -> Self {
        self.from_account = Some(from);
        self.to_account = Some(to);
        self
    }

    /// Sets the second period for a comparative report.
    #[must_use]
    pub fn with_final_period(mut self, period: BalancesPeriod) -> Self {
        self.final_period = Some(period);
        self
    }

    /// The period a pass runs over.
    #[must_use]
    pub fn period(&self, pass: ValuationPass) -> &BalancesPeriod {
        match pass {
            ValuationPass::First => &self.initial_period,
            ValuationPass::Second => self.final_period.as_ref().unwrap_or(&self.initial_period),
        }
    }
}

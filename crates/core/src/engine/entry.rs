//! Working entry type and the composite grouping keys.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use balanza_shared::types::{Currency, SubledgerAccountId};

use crate::chart::{AccountNumber, AccountRole, DebtorCreditor};
use crate::exchange::conversion::{round_balance, round_rate};

use super::row::BalanceRow;

/// Hierarchy level of a rolled-up entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Leaf row (ledger x currency x account x sector x subledger).
    Entry,
    /// Per-account summary, sector and subledger collapsed.
    Summary,
    /// Per ledger-and-currency group total.
    Group,
    /// Synthetic total node (subledger totals).
    Total,
    /// Currency-converted grand total per ledger.
    BalanceTotalConsolidated,
}

/// Composite key identifying one leaf entry.
///
/// Ordered the way leaf rows are reported: ledger, currency, account,
/// sector, subledger number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    /// Ledger number.
    pub ledger: String,
    /// Currency of the balance.
    pub currency: Currency,
    /// Account number.
    pub account: AccountNumber,
    /// Sector code.
    pub sector: String,
    /// Subledger number, if the entry carries subledger detail.
    pub subledger: Option<String>,
}

/// Key of a per-account summary node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SummaryKey {
    /// Ledger number.
    pub ledger: String,
    /// Currency of the balance.
    pub currency: Currency,
    /// Account number.
    pub account: AccountNumber,
}

/// Key of a per ledger-and-currency group node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Ledger number.
    pub ledger: String,
    /// Currency of the balance.
    pub currency: Currency,
}

/// The working unit inside the engine: a balance row plus hierarchy and
/// valuation metadata.
///
/// Parent nodes (`Summary`, `Group`, totals) are synthesized by the engine;
/// they never exist in the raw source and live only for one report build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceEntry {
    /// Hierarchy level.
    pub item_type: ItemType,
    /// Ledger number.
    pub ledger: String,
    /// Currency of the balance.
    pub currency: Currency,
    /// Account number.
    pub account: AccountNumber,
    /// Posting role of the account.
    pub role: AccountRole,
    /// Debtor/creditor nature.
    pub nature: DebtorCreditor,
    /// Sector code; collapsed (None) on summary nodes.
    pub sector: Option<String>,
    /// Subledger account id, on subledger-detail leaves.
    pub subledger_id: Option<SubledgerAccountId>,
    /// Subledger number, on subledger-detail leaves.
    pub subledger_number: Option<String>,
    /// Owning subledger of a folded detail row.
    pub parent_subledger: Option<SubledgerAccountId>,
    /// Group number, set on group and total nodes.
    pub group_number: Option<String>,
    /// Group label, set on group and total nodes.
    pub group_name: Option<String>,
    /// Balance at the start of the period.
    pub initial_balance: Decimal,
    /// Total debits in the period.
    pub debit: Decimal,
    /// Total credits in the period.
    pub credit: Decimal,
    /// Current balance under the nature's sign convention.
    pub current_balance: Decimal,
    /// Valuation factor applied on the first pass.
    pub exchange_rate: Decimal,
    /// Valuation factor applied on the second pass.
    pub second_exchange_rate: Decimal,
    /// Time-weighted average balance, when requested.
    pub average_balance: Option<Decimal>,
    /// True on summary nodes whose account is a control account.
    pub is_parent_posting_entry: bool,
    /// Date of the last movement rolled into this node.
    pub last_change_date: NaiveDate,
}

impl TrialBalanceEntry {
    /// Classifies a raw row into a leaf entry, computing the current
    /// balance with the debtor/creditor sign rule.
    #[must_use]
    pub fn from_row(row: BalanceRow) -> Self {
        let current_balance = row
            .nature
            .current_balance(row.initial_balance, row.debit, row.credit);
        Self {
            item_type: ItemType::Entry,
            ledger: row.ledger,
            currency: row.currency,
            account: row.account,
            role: row.role,
            nature: row.nature,
            sector: Some(row.sector),
            subledger_id: row.subledger_id,
            subledger_number: row.subledger_number,
            parent_subledger: None,
            group_number: None,
            group_name: None,
            initial_balance: row.initial_balance,
            debit: row.debit,
            credit: row.credit,
            current_balance,
            exchange_rate: Decimal::ONE,
            second_exchange_rate: Decimal::ONE,
            average_balance: None,
            is_parent_posting_entry: false,
            last_change_date: row.last_change_date,
        }
    }

    /// An empty synthesized node.
    #[must_use]
    pub fn synthesized(
        item_type: ItemType,
        ledger: String,
        currency: Currency,
        account: AccountNumber,
        role: AccountRole,
        nature: DebtorCreditor,
        last_change_date: NaiveDate,
    ) -> Self {
        Self {
            item_type,
            ledger,
            currency,
            account,
            role,
            nature,
            sector: None,
            subledger_id: None,
            subledger_number: None,
            parent_subledger: None,
            group_number: None,
            group_name: None,
            initial_balance: Decimal::ZERO,
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            current_balance: Decimal::ZERO,
            exchange_rate: Decimal::ONE,
            second_exchange_rate: Decimal::ONE,
            average_balance: None,
            is_parent_posting_entry: false,
            last_change_date,
        }
    }

    /// The composite leaf key of this entry.
    #[must_use]
    pub fn key(&self) -> EntryKey {
        EntryKey {
            ledger: self.ledger.clone(),
            currency: self.currency,
            account: self.account.clone(),
            sector: self.sector.clone().unwrap_or_default(),
            subledger: self.subledger_number.clone(),
        }
    }

    /// Folds another entry's numbers into this node.
    pub fn absorb(&mut self, other: &Self) {
        self.initial_balance += other.initial_balance;
        self.debit += other.debit;
        self.credit += other.credit;
        self.current_balance += other.current_balance;
        if other.last_change_date > self.last_change_date {
            self.last_change_date = other.last_change_date;
        }
    }

    /// True if the row carries neither an opening balance nor movement.
    #[must_use]
    pub fn is_empty_row(&self) -> bool {
        self.initial_balance.is_zero() && self.debit.is_zero() && self.credit.is_zero()
    }

    /// Scales every balance field by a valuation rate.
    pub fn apply_rate(&mut self, rate: Decimal) {
        self.initial_balance *= rate;
        self.debit *= rate;
        self.credit *= rate;
        self.current_balance *= rate;
    }

    /// Rounds balances to 2 decimal places and rates to 6.
    pub fn round(&mut self) {
        self.initial_balance = round_balance(self.initial_balance);
        self.debit = round_balance(self.debit);
        self.credit = round_balance(self.credit);
        self.current_balance = round_balance(self.current_balance);
        self.exchange_rate = round_rate(self.exchange_rate);
        self.second_exchange_rate = round_rate(self.second_exchange_rate);
        if let Some(average) = self.average_balance {
            self.average_balance = Some(round_balance(average));
        }
    }
}

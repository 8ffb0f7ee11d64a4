//! Reference-data catalog resolved once per report build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use balanza_shared::types::{AccountsChartId, SubledgerAccountId};

use super::account::{AccountNumber, AccountRole, DebtorCreditor, StandardAccount};

/// An accounting book within the institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Ledger number ("01").
    pub number: String,
    /// Ledger name.
    pub name: String,
}

/// Sector sub-classification, orthogonal to account and subledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    /// Sector code ("00").
    pub code: String,
    /// Sector name.
    pub name: String,
}

/// A detail-level account nested under a standard account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubledgerAccount {
    /// Unique identifier.
    pub id: SubledgerAccountId,
    /// Subledger number ("00123").
    pub number: String,
    /// Subledger name.
    pub name: String,
}

/// Chart of accounts catalog: accounts, ledgers, and sectors by code.
///
/// Built once per report build from reference data and passed by reference
/// through the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountsChart {
    /// Chart identifier.
    pub id: AccountsChartId,
    /// Standard accounts by number.
    accounts: BTreeMap<AccountNumber, StandardAccount>,
    /// Ledgers by number.
    ledgers: BTreeMap<String, Ledger>,
    /// Sectors by code.
    sectors: BTreeMap<String, Sector>,
}

impl AccountsChart {
    /// Creates an empty chart with the given id.
    #[must_use]
    pub fn new(id: AccountsChartId) -> Self {
        Self {
            id,
            accounts: BTreeMap::new(),
            ledgers: BTreeMap::new(),
            sectors: BTreeMap::new(),
        }
    }

    /// Adds a standard account.
    #[must_use]
    pub fn with_account(mut self, account: StandardAccount) -> Self {
        self.accounts.insert(account.number.clone(), account);
        self
    }

    /// Adds a ledger.
    #[must_use]
    pub fn with_ledger(mut self, ledger: Ledger) -> Self {
        self.ledgers.insert(ledger.number.clone(), ledger);
        self
    }

    /// Adds a sector.
    #[must_use]
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sectors.insert(sector.code.clone(), sector);
        self
    }

    /// Looks up a standard account by number.
    #[must_use]
    pub fn account(&self, number: &AccountNumber) -> Option<&StandardAccount> {
        self.accounts.get(number)
    }

    /// Looks up a ledger by number.
    #[must_use]
    pub fn ledger(&self, number: &str) -> Option<&Ledger> {
        self.ledgers.get(number)
    }

    /// Looks up a sector by code.
    #[must_use]
    pub fn sector(&self, code: &str) -> Option<&Sector> {
        self.sectors.get(code)
    }

    /// Posting role of an account; accounts missing from the snapshot are
    /// treated as control accounts (they only ever appear as ancestors).
    #[must_use]
    pub fn role_of(&self, number: &AccountNumber) -> AccountRole {
        self.account(number).map_or(AccountRole::Control, |a| a.role)
    }

    /// Nature of an account, falling back to the child's nature when the
    /// chart snapshot does not carry the ancestor.
    #[must_use]
    pub fn nature_of(&self, number: &AccountNumber, fallback: DebtorCreditor) -> DebtorCreditor {
        self.account(number).map_or(fallback, |a| a.nature)
    }
}

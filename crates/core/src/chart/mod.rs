//! Chart-of-accounts reference data.
//!
//! Ledgers, standard accounts, sectors, and subledger accounts are
//! read-only reference data. The engine resolves them once per build
//! through an [`AccountsChart`] instead of parsing codes ad hoc.

pub mod account;
pub mod catalog;

pub use account::{AccountNumber, AccountRole, DebtorCreditor, StandardAccount};
pub use catalog::{AccountsChart, Ledger, Sector, SubledgerAccount};

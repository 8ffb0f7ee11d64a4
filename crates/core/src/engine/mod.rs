//! Trial balance aggregation engine.
//!
//! Consumes raw posted-voucher balance rows and a query, applies currency
//! valuation, and rolls entries up into the summary/group/total hierarchy.
//! The pipeline is single-threaded per build; each stage is a separable,
//! independently testable function.

pub mod builder;
pub mod entry;
pub mod error;
pub mod row;


#[cfg(test)]
mod props;

pub use builder::TrialBalanceEngine;
pub use entry::{EntryKey, GroupKey, ItemType, SummaryKey, TrialBalanceEntry};
pub use error::EngineError;
pub use row::{BalanceRow, BalanceSource, RowsRequest};

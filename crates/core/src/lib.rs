//! Core balance-engine logic for Balanza.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, the trial balance aggregation engine,
//! and the report assemblers live here.
//!
//! # Modules
//!
//! - `chart` - Chart-of-accounts reference data (ledgers, accounts, sectors)
//! - `exchange` - Exchange rates and currency valuation
//! - `query` - Report query types and validation
//! - `engine` - Trial balance aggregation engine (fetch, valuate, rollup)
//! - `reports` - Report-specific assemblers (traditional, comparative, ...)

pub mod chart;
pub mod engine;
pub mod exchange;
pub mod query;
pub mod reports;

#[cfg(test)]
pub(crate) mod testkit;

//! Report query types and validation.
//!
//! A [`TrialBalanceQuery`] is constructed by the caller, validated once,
//! and then passed by reference through the whole pipeline without being
//! mutated. The second valuation pass is selected with an explicit
//! [`ValuationPass`] argument rather than a flag flipped on the query.

pub mod types;
pub mod validation;

pub use types::{BalancesPeriod, BalancesType, ReportType, TrialBalanceQuery, ValuationPass};
pub use validation::QueryError;

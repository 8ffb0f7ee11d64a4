//! Exchange rates and currency valuation.
//!
//! Rate data is read-only reference data scoped to a single date. A
//! [`RateTable`] is built from one source call per valuation pass and
//! cached only for that pass.

pub mod conversion;
pub mod rate;
pub mod table;

pub use conversion::{convert_amount, round_balance, round_rate};
pub use rate::{ExchangeRate, ExchangeRateSource, RateType};
pub use table::RateTable;

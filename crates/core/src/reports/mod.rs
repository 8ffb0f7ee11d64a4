//! Report-specific assemblers.
//!
//! Each assembler consumes the engine's rolled-up entries and reshapes,
//! filters, and labels them into a self-describing table. Assemblers add
//! no business rules of their own: a numeric invariant broken here is an
//! engine bug.

pub mod analytic;
pub mod cascade;
pub mod comparative;
pub mod currency_columns;
pub mod subledger;
pub mod table;
pub mod traditional;


pub use analytic::{AnalyticAssembler, AnalyticEntry};
pub use cascade::{CascadeAssembler, CascadeEntry};
pub use comparative::{ComparativeAssembler, ComparativeEntry};
pub use currency_columns::{CurrencyColumnsAssembler, CurrencyColumnsEntry};
pub use subledger::{SubledgerAssembler, SUBLEDGER_TOTAL_PREFIX};
pub use table::{ColumnDataType, ReportColumn, ReportTable};
pub use traditional::{TraditionalAssembler, TraditionalEntry};

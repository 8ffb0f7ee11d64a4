//! Self-describing report table.

use serde::Serialize;

use crate::query::TrialBalanceQuery;

/// How a column's values should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDataType {
    /// Free text (account numbers, names, labels).
    Text,
    /// Fixed-point amount or rate.
    Decimal,
    /// Calendar date.
    Date,
}

/// Descriptor for one report column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    /// Field name on the entry struct this column is bound to.
    pub field: String,
    /// Human-readable header.
    pub label: String,
    /// Rendering hint for the column's values.
    pub data_type: ColumnDataType,
}

impl ReportColumn {
    /// Text column bound to `field`.
    #[must_use]
    pub fn text(field: &str, label: &str) -> Self {
        Self {
            field: field.to_owned(),
            label: label.to_owned(),
            data_type: ColumnDataType::Text,
        }
    }

    /// Decimal column bound to `field`.
    #[must_use]
    pub fn decimal(field: &str, label: &str) -> Self {
        Self {
            field: field.to_owned(),
            label: label.to_owned(),
            data_type: ColumnDataType::Decimal,
        }
    }

    /// Date column bound to `field`.
    #[must_use]
    pub fn date(field: &str, label: &str) -> Self {
        Self {
            field: field.to_owned(),
            label: label.to_owned(),
            data_type: ColumnDataType::Date,
        }
    }
}

/// A finished report: the query that produced it, the column layout, and
/// the entry rows in emission order.
#[derive(Debug, Clone, Serialize)]
pub struct ReportTable<E> {
    /// Echo of the query the report was built from.
    pub query: TrialBalanceQuery,
    /// Column descriptors in display order.
    pub columns: Vec<ReportColumn>,
    /// Rows in final display order.
    pub entries: Vec<E>,
}

impl<E> ReportTable<E> {
    /// Assembles a table from its parts.
    #[must_use]
    pub fn new(query: TrialBalanceQuery, columns: Vec<ReportColumn>, entries: Vec<E>) -> Self {
        Self {
            query,
            columns,
            entries,
        }
    }

    /// Number of entry rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report carries no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

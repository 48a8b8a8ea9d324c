//! Column-value rewriting applied to rows before translation.
//!
//! Mapping is a narrow capability: one call per row, same arity out as in.
//! The translator neither knows nor cares what a mapping does.

mod rule;


use crate::value::Value;
use thiserror::Error as ThisError;

// re-exports
pub use rule::{MappingRule, RuleMapping, wildcard_match};

///
/// ColumnMapping
///

pub trait ColumnMapping: Send + Sync {
    /// Rewrite one row of `schema`.`table`.
    ///
    /// `columns` lists the table's column names in row order.
    fn map_row(
        &self,
        schema: &str,
        table: &str,
        columns: &[String],
        row: &[Value],
    ) -> Result<MappedRow, MappingError>;
}

///
/// MappedRow
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedRow {
    pub values: Vec<Value>,
    /// Free-form side data produced by the mapping (e.g. rules applied).
    /// Not used for translation.
    pub aux: Vec<String>,
}

impl MappedRow {
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            aux: Vec::new(),
        }
    }
}

///
/// MappingError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum MappingError {
    #[error("column '{column}' cannot be mapped by rule '{rule}': {reason}")]
    InvalidValue {
        rule: String,
        column: String,
        reason: String,
    },

    #[error("column '{column}' value {value} exceeds the partition id origin range")]
    OriginOverflow { column: String, value: i64 },

    /// Raised by external mapping implementations.
    #[error("{0}")]
    Other(String),
}

///
/// NoopMapping
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMapping;

impl ColumnMapping for NoopMapping {
    fn map_row(
        &self,
        _schema: &str,
        _table: &str,
        _columns: &[String],
        row: &[Value],
    ) -> Result<MappedRow, MappingError> {
        Ok(MappedRow::new(row.to_vec()))
    }
}

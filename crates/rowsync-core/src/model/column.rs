use crate::error::InternalError;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

///
/// Column
/// Immutable column descriptor captured from the source table.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    /// Position of this column inside every row image.
    pub ordinal: usize,
    /// Declared SQL type as reported by the source, e.g. `mediumint(8) unsigned`.
    pub declared_type: String,
    pub unsigned: bool,
    pub not_null: bool,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, ordinal: usize, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal,
            declared_type: declared_type.into(),
            unsigned: false,
            not_null: false,
        }
    }

    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }
}

///
/// ColumnCatalog
///
/// Ordered column descriptors for one table.
/// Position `i` always holds the column whose ordinal is `i`.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct ColumnCatalog(Vec<Arc<Column>>);

impl ColumnCatalog {
    /// Build a catalog, rejecting ordinals that do not match their position.
    pub fn new(columns: Vec<Column>) -> Result<Self, InternalError> {
        for (position, column) in columns.iter().enumerate() {
            if column.ordinal != position {
                return Err(InternalError::catalog_invariant(format!(
                    "column '{}' declares ordinal {} but sits at position {position}",
                    column.name, column.ordinal
                )));
            }
        }

        Ok(Self(columns.into_iter().map(Arc::new).collect()))
    }

    /// Look up a column by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<Column>> {
        self.0.iter().find(|column| column.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|column| column.name.clone()).collect()
    }
}

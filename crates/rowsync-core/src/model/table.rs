use crate::{
    model::{ColumnCatalog, IndexCatalog},
    value::Value,
};
use serde::{Deserialize, Serialize};

///
/// RowImage
/// One row's captured values, ordered like the column catalog.
///

pub type RowImage = Vec<Value>;

///
/// UpdatePair
/// Before and after images of one updated row.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UpdatePair {
    pub before: RowImage,
    pub after: RowImage,
}

impl UpdatePair {
    #[must_use]
    pub const fn new(before: RowImage, after: RowImage) -> Self {
        Self { before, after }
    }
}

///
/// TableSchema
///
/// Immutable snapshot of one target table: identifiers plus catalogs.
/// Identifiers are used verbatim inside backticks.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableSchema {
    pub schema: String,
    pub table: String,
    pub columns: ColumnCatalog,
    pub indexes: IndexCatalog,
}

impl TableSchema {
    #[must_use]
    pub fn new(
        schema: impl Into<String>,
        table: impl Into<String>,
        columns: ColumnCatalog,
        indexes: IndexCatalog,
    ) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            columns,
            indexes,
        }
    }

    /// `` `schema`.`table` `` as it appears in generated statements.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("`{}`.`{}`", self.schema, self.table)
    }
}

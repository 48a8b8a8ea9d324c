//! Index selection and identity keys.
//!
//! Two different questions are answered here:
//! - which index should key a WHERE clause (`select_*`);
//! - what every index says about a row (`all_identity_keys`).
//!
//! The second never depends on the first. Conflict detection downstream
//! needs the full unique-constraint surface of the row.


use crate::{
    KEY_SEPARATOR, PRIMARY_INDEX,
    model::{Column, IndexCatalog, IndexColumns},
    value::{Value, canonical_text},
};
use std::sync::Arc;

///
/// select_schema_fit_index
///
/// Index whose values are guaranteed present for every row:
/// a non-empty primary key, else the first index (name order) whose
/// columns are all declared NOT NULL.
///

#[must_use]
pub fn select_schema_fit_index(indexes: &IndexCatalog) -> Option<&IndexColumns> {
    if let Some(primary) = indexes.primary() {
        if !primary.is_empty() {
            return Some(primary);
        }
        tracing::error!(index = PRIMARY_INDEX, "primary index declared without columns");
    }

    first_index_where(indexes, |column| column.not_null)
}

///
/// select_row_available_index
///
/// First index (name order) whose columns all hold non-null values in
/// this particular row. Only meaningful for the row it was computed from.
///

#[must_use]
pub fn select_row_available_index<'a>(
    indexes: &'a IndexCatalog,
    row: &[Value],
) -> Option<&'a IndexColumns> {
    first_index_where(indexes, |column| {
        row.get(column.ordinal).is_some_and(|value| !value.is_null())
    })
}

fn first_index_where<'a>(
    indexes: &'a IndexCatalog,
    accept: impl Fn(&Column) -> bool,
) -> Option<&'a IndexColumns> {
    indexes
        .values()
        .filter(|columns| !columns.is_empty())
        .find(|columns| columns.iter().all(|column| accept(column)))
}

///
/// all_identity_keys
///
/// One key per declared index, in index name order.
///

#[must_use]
pub fn all_identity_keys(indexes: &IndexCatalog, row: &[Value]) -> Vec<String> {
    indexes
        .values()
        .map(|columns| identity_key(columns, row))
        .collect()
}

/// Join the canonical text of `row` at the index's column positions.
#[must_use]
pub fn identity_key(columns: &[Arc<Column>], row: &[Value]) -> String {
    let (columns, values) = project(columns, row);

    columns
        .iter()
        .zip(&values)
        .map(|(column, value)| canonical_text(value, column.unsigned, &column.declared_type))
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Values of `row` at the positions of `columns`, paired with those columns.
///
/// Columns beyond the row's length are skipped; callers validate arity
/// before projecting, so this only trims malformed catalogs.
pub(crate) fn project<'a>(
    columns: &'a [Arc<Column>],
    row: &[Value],
) -> (Vec<&'a Arc<Column>>, Vec<Value>) {
    columns
        .iter()
        .filter_map(|column| row.get(column.ordinal).map(|value| (column, value.clone())))
        .unzip()
}

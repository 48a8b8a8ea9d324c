//! DML text and bound parameters.
//!
//! Builders here operate on already-cast rows and already-chosen indexes.
//! They never inspect catalogs beyond the columns they are handed.

mod clause;

#[cfg(test)]
mod tests;

use crate::{
    identity::project,
    model::{IndexColumns, TableSchema},
    value::Value,
};
use serde::{Deserialize, Serialize};

// re-exports
pub use clause::{column_list, placeholders, set_clause, where_clause};

///
/// GeneratedStatement
///
/// One executable statement plus the identity keys it touches.
/// Keys are for conflict detection only and are never bound.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GeneratedStatement {
    pub sql: String,
    pub values: Vec<Value>,
    pub keys: Vec<String>,
}

///
/// insert_sql
///
/// `REPLACE INTO` over every column. Rows whose key already exists are
/// overwritten, which keeps replay after a crash harmless.
///

#[must_use]
pub fn insert_sql(table: &TableSchema) -> String {
    format!(
        "REPLACE INTO {} ({}) VALUES ({});",
        table.qualified_name(),
        column_list(&table.columns),
        placeholders(table.columns.len())
    )
}

///
/// delete_statement
///
/// Returns the statement text and the values bound to its WHERE clause.
///

#[must_use]
pub fn delete_statement(
    table: &TableSchema,
    row: &[Value],
    fit: Option<&IndexColumns>,
) -> (String, Vec<Value>) {
    let (where_sql, where_values) = keyed_where(table, row, fit);
    let sql = format!(
        "DELETE FROM {} WHERE {where_sql} LIMIT 1;",
        table.qualified_name()
    );

    (sql, where_values)
}

///
/// update_statement
///
/// `UPDATE ... SET <every column> WHERE <fit index or all columns> LIMIT 1`.
/// Bound values are the after image followed by the WHERE values taken
/// from the before image.
///
/// The SET list is every column of the table, changed or not. Returns
/// `None` only when that list is empty, i.e. for a table without columns.
///

#[must_use]
pub fn update_statement(
    table: &TableSchema,
    before: &[Value],
    after: &[Value],
    fit: Option<&IndexColumns>,
) -> Option<(String, Vec<Value>)> {
    // TODO: decide whether unchanged columns should leave the SET list and
    // no-op updates be skipped; today every column is always written.
    let set_columns = &table.columns;
    if set_columns.is_empty() {
        return None;
    }

    let (where_sql, where_values) = keyed_where(table, before, fit);

    let mut values = Vec::with_capacity(after.len() + where_values.len());
    values.extend_from_slice(after);
    values.extend(where_values);

    let sql = format!(
        "UPDATE {} SET {} WHERE {where_sql} LIMIT 1;",
        table.qualified_name(),
        set_clause(set_columns)
    );

    Some((sql, values))
}

///
/// safe_update_statements
///
/// Decompose an update into `DELETE` (before image) + `REPLACE` (after
/// image). Both halves carry the same keys, which must already span the
/// before and after identities.
///

#[must_use]
pub fn safe_update_statements(
    table: &TableSchema,
    before: &[Value],
    after: Vec<Value>,
    fit: Option<&IndexColumns>,
    keys: &[String],
) -> [GeneratedStatement; 2] {
    let (delete_sql, delete_values) = delete_statement(table, before, fit);

    [
        GeneratedStatement {
            sql: delete_sql,
            values: delete_values,
            keys: keys.to_vec(),
        },
        GeneratedStatement {
            sql: insert_sql(table),
            values: after,
            keys: keys.to_vec(),
        },
    ]
}

// WHERE over the fit index, or over every column when there is none.
fn keyed_where(
    table: &TableSchema,
    row: &[Value],
    fit: Option<&IndexColumns>,
) -> (String, Vec<Value>) {
    let key_columns = match fit {
        Some(columns) if !columns.is_empty() => columns.as_slice(),
        _ => table.columns.as_slice(),
    };

    let (columns, values) = project(key_columns, row);
    let where_sql = where_clause(&columns, &values);

    (where_sql, values)
}

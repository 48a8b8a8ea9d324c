use crate::{PLACEHOLDER, model::Column, value::Value};
use std::{fmt::Write as _, sync::Arc};

/// `` `a`,`b`,`c` `` with no inserted whitespace.
#[must_use]
pub fn column_list(columns: &[Arc<Column>]) -> String {
    columns
        .iter()
        .map(|column| format!("`{}`", column.name))
        .collect::<Vec<_>>()
        .join(",")
}

/// `?,?,?`
#[must_use]
pub fn placeholders(count: usize) -> String {
    vec![PLACEHOLDER; count].join(",")
}

///
/// where_clause
///
/// `` `a` = ? AND `b` IS ? ``. `IS` exactly where the bound value is
/// NULL, since `col = NULL` never matches.
///

#[must_use]
pub fn where_clause(columns: &[&Arc<Column>], values: &[Value]) -> String {
    let mut out = String::new();

    for (i, (column, value)) in columns.iter().zip(values).enumerate() {
        if i > 0 {
            out.push_str(" AND ");
        }
        let op = if value.is_null() { "IS" } else { "=" };
        let _ = write!(out, "`{}` {op} {PLACEHOLDER}", column.name);
    }

    out
}

/// `` `a` = ?, `b` = ? ``
#[must_use]
pub fn set_clause(columns: &[Arc<Column>]) -> String {
    columns
        .iter()
        .map(|column| format!("`{}` = {PLACEHOLDER}", column.name))
        .collect::<Vec<_>>()
        .join(", ")
}

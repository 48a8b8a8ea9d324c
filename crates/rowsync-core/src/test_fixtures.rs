//! Shared catalogs for unit tests.

use crate::model::{Column, ColumnCatalog, IndexCatalog, TableSchema};

/// `db`.`t`: `id int unsigned not null` (primary), `name varchar`.
pub(crate) fn primary_table() -> TableSchema {
    let columns = ColumnCatalog::new(vec![
        Column::new("id", 0, "int(10) unsigned").unsigned().not_null(),
        Column::new("name", 1, "varchar(20)"),
    ])
    .expect("fixture catalog");
    let indexes = IndexCatalog::resolve(&columns, [("primary", ["id"])]);

    TableSchema::new("db", "t", columns, indexes)
}

/// `db`.`acct`: no primary key.
///
/// - `uk_email` on a nullable `email`;
/// - `uk_code` on `region`, `code`, both declared not null.
pub(crate) fn unique_table() -> TableSchema {
    let columns = ColumnCatalog::new(vec![
        Column::new("email", 0, "varchar(64)"),
        Column::new("region", 1, "char(2)").not_null(),
        Column::new("code", 2, "int(11)").not_null(),
        Column::new("note", 3, "text"),
    ])
    .expect("fixture catalog");
    let indexes = IndexCatalog::resolve(
        &columns,
        [
            ("uk_email", vec!["email"]),
            ("uk_code", vec!["region", "code"]),
        ],
    );

    TableSchema::new("db", "acct", columns, indexes)
}

/// `db`.`loose`: every column nullable, two single-column unique keys.
pub(crate) fn nullable_table() -> TableSchema {
    let columns = ColumnCatalog::new(vec![
        Column::new("a", 0, "int(11)"),
        Column::new("b", 1, "int(11)"),
        Column::new("c", 2, "varchar(8)"),
    ])
    .expect("fixture catalog");
    let indexes = IndexCatalog::resolve(&columns, [("uk_a", ["a"]), ("uk_b", ["b"])]);

    TableSchema::new("db", "loose", columns, indexes)
}

/// `db`.`heap`: no indexes at all.
pub(crate) fn heap_table() -> TableSchema {
    let columns = ColumnCatalog::new(vec![
        Column::new("a", 0, "int(11)"),
        Column::new("b", 1, "varchar(8)"),
    ])
    .expect("fixture catalog");

    TableSchema::new("db", "heap", columns, IndexCatalog::new())
}

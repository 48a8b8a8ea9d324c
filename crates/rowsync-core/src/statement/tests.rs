use crate::{
    identity::{project, select_schema_fit_index},
    model::{Column, ColumnCatalog, IndexCatalog, TableSchema},
    statement::{
        column_list, delete_statement, insert_sql, placeholders, safe_update_statements,
        set_clause, update_statement, where_clause,
    },
    test_fixtures::{heap_table, primary_table, unique_table},
    value::Value,
};
use proptest::prelude::*;

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

// ---- clauses ----------------------------------------------------------

#[test]
fn column_list_has_no_whitespace() {
    let table = unique_table();

    assert_eq!(
        column_list(&table.columns),
        "`email`,`region`,`code`,`note`"
    );
}

#[test]
fn placeholders_match_count() {
    assert_eq!(placeholders(0), "");
    assert_eq!(placeholders(1), "?");
    assert_eq!(placeholders(3), "?,?,?");
}

#[test]
fn set_clause_lists_every_column() {
    assert_eq!(
        set_clause(&primary_table().columns),
        "`id` = ?, `name` = ?"
    );
}

#[test]
fn where_clause_uses_is_for_nulls() {
    let table = heap_table();
    let row = vec![Value::Null, text("x")];
    let (columns, values) = project(&table.columns, &row);

    assert_eq!(where_clause(&columns, &values), "`a` IS ? AND `b` = ?");
}

// ---- statements -------------------------------------------------------

#[test]
fn insert_lists_every_column() {
    assert_eq!(
        insert_sql(&primary_table()),
        "REPLACE INTO `db`.`t` (`id`,`name`) VALUES (?,?);"
    );
}

#[test]
fn delete_uses_fit_index() {
    let table = primary_table();
    let fit = select_schema_fit_index(&table.indexes);
    let (sql, values) = delete_statement(&table, &[Value::Uint32(5), text("alice")], fit);

    assert_eq!(sql, "DELETE FROM `db`.`t` WHERE `id` = ? LIMIT 1;");
    assert_eq!(values, vec![Value::Uint32(5)]);
}

#[test]
fn delete_without_index_uses_every_column() {
    let table = heap_table();
    let (sql, values) = delete_statement(&table, &[Value::Int32(1), Value::Null], None);

    assert_eq!(
        sql,
        "DELETE FROM `db`.`heap` WHERE `a` = ? AND `b` IS ? LIMIT 1;"
    );
    assert_eq!(values, vec![Value::Int32(1), Value::Null]);
}

#[test]
fn empty_fit_index_behaves_like_none() {
    let table = heap_table();
    let empty = Vec::new();
    let (sql, _) = delete_statement(&table, &[Value::Int32(1), text("b")], Some(&empty));

    assert_eq!(
        sql,
        "DELETE FROM `db`.`heap` WHERE `a` = ? AND `b` = ? LIMIT 1;"
    );
}

#[test]
fn update_sets_all_columns_and_keys_on_before_image() {
    let table = primary_table();
    let fit = select_schema_fit_index(&table.indexes);
    let before = [Value::Uint32(5), text("alice")];
    let after = [Value::Uint32(5), text("bob")];

    let (sql, values) = update_statement(&table, &before, &after, fit).expect("update emitted");

    assert_eq!(
        sql,
        "UPDATE `db`.`t` SET `id` = ?, `name` = ? WHERE `id` = ? LIMIT 1;"
    );
    assert_eq!(values, vec![Value::Uint32(5), text("bob"), Value::Uint32(5)]);
}

#[test]
fn unchanged_update_still_writes_every_column() {
    let table = primary_table();
    let fit = select_schema_fit_index(&table.indexes);
    let row = [Value::Uint32(5), text("same")];

    let (sql, values) = update_statement(&table, &row, &row, fit).expect("update emitted");

    assert!(sql.contains("SET `id` = ?, `name` = ?"));
    assert_eq!(values.len(), 3);
}

#[test]
fn update_on_columnless_table_is_skipped() {
    let table = TableSchema::new(
        "db",
        "empty",
        ColumnCatalog::new(Vec::new()).expect("catalog"),
        IndexCatalog::new(),
    );

    assert_eq!(update_statement(&table, &[], &[], None), None);
}

#[test]
fn safe_update_is_delete_then_replace() {
    let table = primary_table();
    let fit = select_schema_fit_index(&table.indexes);
    let keys = vec!["5".to_string(), "6".to_string()];
    let before = [Value::Uint32(5), text("alice")];
    let after = vec![Value::Uint32(6), text("alice")];

    let [delete, replace] = safe_update_statements(&table, &before, after.clone(), fit, &keys);

    assert_eq!(delete.sql, "DELETE FROM `db`.`t` WHERE `id` = ? LIMIT 1;");
    assert_eq!(delete.values, vec![Value::Uint32(5)]);
    assert_eq!(delete.keys, keys);
    assert_eq!(
        replace.sql,
        "REPLACE INTO `db`.`t` (`id`,`name`) VALUES (?,?);"
    );
    assert_eq!(replace.values, after);
    assert_eq!(replace.keys, keys);
}

#[test]
fn identifiers_are_used_verbatim() {
    let columns = ColumnCatalog::new(vec![Column::new("order id", 0, "int")]).expect("catalog");
    let table = TableSchema::new("my-db", "Orders", columns, IndexCatalog::new());

    assert_eq!(
        insert_sql(&table),
        "REPLACE INTO `my-db`.`Orders` (`order id`) VALUES (?);"
    );
}

fn arb_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i32>().prop_map(Value::Int32),
        "[a-z]{0,4}".prop_map(Value::Text),
    ]
}

proptest! {
    #[test]
    fn where_operator_tracks_nullness(row in prop::collection::vec(arb_cell(), 4)) {
        let table = unique_table();
        let (sql, values) = delete_statement(&table, &row, None);

        prop_assert_eq!(values.len(), sql.matches('?').count());
        prop_assert_eq!(sql.matches(" IS ?").count(), row.iter().filter(|v| v.is_null()).count());
        prop_assert_eq!(sql.matches(" = ?").count(), row.iter().filter(|v| !v.is_null()).count());
    }
}

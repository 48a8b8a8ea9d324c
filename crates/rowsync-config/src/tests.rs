use super::*;

#[test]
fn empty_document_uses_defaults() {
    let config = TranslatorConfig::from_toml_str("").expect("empty config should parse");

    assert!(!config.safe_mode);
    assert!(!config.debug);
    assert_eq!(config.checkpoint, CheckpointConfig::default());
    assert!(config.column_mapping.is_empty());
}

#[test]
fn full_document_parses_rules() {
    let input = r#"
        safe-mode = true
        debug = true

        [checkpoint]
        meta-schema = "meta"
        task = "orders_sync"

        [[column-mapping]]
        name = "tag-region"
        schema-pattern = "shop_*"
        table-pattern = "orders"
        column = "code"
        expression = "add-prefix"
        prefix = "eu-"

        [[column-mapping]]
        name = "shard-ids"
        schema-pattern = "shop_?"
        table-pattern = "*"
        column = "id"
        expression = "partition-id"
        instance-id = 1
        schema-id = 2
        table-id = 3
    "#;

    let config = TranslatorConfig::from_toml_str(input).expect("config should parse");

    assert!(config.safe_mode);
    assert!(config.debug);
    assert_eq!(config.checkpoint.meta_schema, "meta");
    assert_eq!(config.checkpoint.task, "orders_sync");
    assert_eq!(config.column_mapping.len(), 2);
    assert_eq!(
        config.column_mapping[0].expression,
        MappingExpression::AddPrefix {
            prefix: "eu-".to_string()
        }
    );
    assert_eq!(
        config.column_mapping[1].expression,
        MappingExpression::PartitionId {
            instance_id: 1,
            schema_id: 2,
            table_id: 3,
        }
    );
}

#[test]
fn unknown_top_level_field_is_rejected() {
    let err = TranslatorConfig::from_toml_str("safe_mode = true").expect_err("snake case key");

    assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err}");
}

#[test]
fn empty_checkpoint_task_is_rejected() {
    let input = r#"
        [checkpoint]
        task = ""
    "#;

    let err = TranslatorConfig::from_toml_str(input).expect_err("empty task");

    assert!(matches!(
        err,
        ConfigError::EmptyField {
            field: "checkpoint.task"
        }
    ));
}

#[test]
fn partition_id_out_of_range_is_rejected() {
    let input = r#"
        [[column-mapping]]
        name = "too-wide"
        schema-pattern = "*"
        table-pattern = "*"
        column = "id"
        expression = "partition-id"
        instance-id = 16
        schema-id = 0
        table-id = 0
    "#;

    let err = TranslatorConfig::from_toml_str(input).expect_err("instance id overflow");

    match err {
        ConfigError::InvalidRule { rule, reason } => {
            assert_eq!(rule, "too-wide");
            assert!(reason.contains("instance-id 16"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn origin_bits_leave_room_for_sign() {
    assert_eq!(
        1 + INSTANCE_ID_BITS + SCHEMA_ID_BITS + TABLE_ID_BITS + ORIGIN_ID_BITS,
        64
    );
    assert_eq!(ORIGIN_ID_BITS, 44);
}

#[test]
fn missing_file_reports_path() {
    let err = TranslatorConfig::load("/nonexistent/rowsync.toml").expect_err("missing file");

    assert!(err.to_string().contains("/nonexistent/rowsync.toml"));
}

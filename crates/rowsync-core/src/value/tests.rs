use crate::{
    model::Column,
    value::{Value, canonical_text, cast_row, cast_unsigned},
};
use proptest::prelude::*;
use std::sync::Arc;

// ---- cast_unsigned ----------------------------------------------------

#[test]
fn signed_column_is_untouched() {
    assert_eq!(cast_unsigned(Value::Int8(-1), false, "tinyint"), Value::Int8(-1));
    assert_eq!(
        cast_unsigned(Value::Int64(-1), false, "bigint"),
        Value::Int64(-1)
    );
}

#[test]
fn small_widths_keep_their_width() {
    assert_eq!(
        cast_unsigned(Value::Int8(-1), true, "tinyint(3) unsigned"),
        Value::Uint8(255)
    );
    assert_eq!(
        cast_unsigned(Value::Int16(-2), true, "smallint(5) unsigned"),
        Value::Uint16(65534)
    );
    assert_eq!(
        cast_unsigned(Value::Int32(-1), true, "int(10) unsigned"),
        Value::Uint32(u32::MAX)
    );
}

#[test]
fn mediumint_uses_low_three_bytes() {
    assert_eq!(
        cast_unsigned(Value::Int32(-4_692_783), true, "mediumint(8) unsigned"),
        Value::Uint32(12_084_433)
    );
    assert_eq!(
        cast_unsigned(Value::Int32(-4_692_783), true, "MEDIUMINT UNSIGNED"),
        Value::Uint32(12_084_433)
    );
    assert_eq!(
        cast_unsigned(Value::Int32(-4_692_783), true, "int(10) unsigned"),
        Value::Uint32(4_290_274_513)
    );
    assert_eq!(
        cast_unsigned(Value::Int32(8_000_000), true, "mediumint unsigned"),
        Value::Uint32(8_000_000)
    );
}

#[test]
fn bigint_becomes_decimal_text() {
    assert_eq!(
        cast_unsigned(Value::Int64(-1), true, "bigint(20) unsigned"),
        Value::Text("18446744073709551615".to_string())
    );
    assert_eq!(
        cast_unsigned(Value::Int64(42), true, "bigint(20) unsigned"),
        Value::Text("42".to_string())
    );
}

#[test]
fn non_integer_values_pass_through() {
    let values = [
        Value::Null,
        Value::Bool(true),
        Value::Uint32(7),
        Value::Float64(1.5),
        Value::Text("x".to_string()),
        Value::Bytes(vec![1, 2]),
        Value::Decimal("1.10".to_string()),
        Value::Json(serde_json::json!({"a": 1})),
    ];

    for value in values {
        assert_eq!(cast_unsigned(value.clone(), true, "whatever"), value);
    }
}

#[test]
fn cast_row_follows_column_flags() {
    let columns = vec![
        Arc::new(Column::new("a", 0, "int unsigned").unsigned()),
        Arc::new(Column::new("b", 1, "int")),
    ];
    let row = vec![Value::Int32(-1), Value::Int32(-1)];

    assert_eq!(
        cast_row(&columns, &row),
        vec![Value::Uint32(u32::MAX), Value::Int32(-1)]
    );
}

// ---- canonical_text ---------------------------------------------------

#[test]
fn canonical_text_renders_each_kind() {
    let cases = [
        (Value::Null, "null"),
        (Value::Bool(true), "1"),
        (Value::Bool(false), "0"),
        (Value::Int8(-8), "-8"),
        (Value::Int64(i64::MIN), "-9223372036854775808"),
        (Value::Uint64(u64::MAX), "18446744073709551615"),
        (Value::Float32(0.1), "0.1"),
        (Value::Float64(2.5), "2.5"),
        (Value::Float64(100.0), "100"),
        (Value::Float64(1e21), "1000000000000000000000"),
        (Value::Text("alice".to_string()), "alice"),
        (Value::Bytes(b"raw".to_vec()), "raw"),
        (Value::Decimal("12.340".to_string()), "12.340"),
        (Value::Json(serde_json::json!([1, "a"])), "[1,\"a\"]"),
    ];

    for (value, expected) in cases {
        assert_eq!(
            canonical_text(&value, false, ""),
            expected,
            "rendering {value:?}"
        );
    }
}

#[test]
fn canonical_text_renders_non_finite_floats() {
    assert_eq!(canonical_text(&Value::Float64(f64::INFINITY), false, ""), "inf");
    assert_eq!(canonical_text(&Value::Float64(f64::NEG_INFINITY), false, ""), "-inf");
    assert_eq!(canonical_text(&Value::Float32(f32::NAN), false, ""), "NaN");
}

fn bytes_key(bytes: &[u8]) -> String {
    canonical_text(&Value::Bytes(bytes.to_vec()), false, "varbinary(16)")
}

#[test]
fn invalid_utf8_bytes_render_as_hex_escapes() {
    assert_eq!(bytes_key(&[0x80, 0x01]), "\\x80\u{1}");
    assert_eq!(bytes_key(&[0x81, 0x01]), "\\x81\u{1}");
    assert_eq!(bytes_key(b"id\xff\x00"), "id\\xff\0");
    assert_ne!(bytes_key(&[0x80, 0x01]), bytes_key(&[0x81, 0x01]));
}

#[test]
fn valid_utf8_bytes_render_unchanged() {
    assert_eq!(bytes_key("zürich-東京".as_bytes()), "zürich-東京");
    assert_eq!(bytes_key(b""), "");
}

#[test]
fn backslashes_cannot_forge_escapes() {
    // literal `\x80` text vs the single invalid byte 0x80
    assert_ne!(bytes_key(b"\\x80"), bytes_key(&[0x80]));
    assert_eq!(bytes_key(b"a\\b"), "a\\\\b");
}

proptest! {
    #[test]
    fn distinct_bytes_give_distinct_keys(
        a in prop::collection::vec(any::<u8>(), 0..12),
        b in prop::collection::vec(any::<u8>(), 0..12),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(bytes_key(&a), bytes_key(&b));
    }
}

#[test]
fn canonical_text_casts_before_rendering() {
    assert_eq!(
        canonical_text(&Value::Int32(-4_692_783), true, "mediumint unsigned"),
        "12084433"
    );
    assert_eq!(
        canonical_text(&Value::Int64(-2), true, "bigint unsigned"),
        "18446744073709551614"
    );
}

#[test]
fn canonical_text_is_stable_over_cast_values() {
    let raw = Value::Int16(-3);
    let casted = cast_unsigned(raw.clone(), true, "smallint unsigned");

    assert_eq!(
        canonical_text(&raw, true, "smallint unsigned"),
        canonical_text(&casted, true, "smallint unsigned")
    );
}

#[test]
fn option_converts_to_null() {
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
}

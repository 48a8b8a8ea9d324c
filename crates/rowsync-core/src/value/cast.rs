use crate::{model::Column, value::Value};
use std::{fmt::Write as _, sync::Arc};

/// Declared type fragment marking a 3-byte integer column.
const MEDIUMINT: &str = "mediumint";

///
/// cast_unsigned
///
/// Reinterpret a signed captured integer in its unsigned domain.
///
/// The capture layer decodes every integer as signed. For unsigned columns
/// the bit pattern is kept and re-read at the column's width:
/// - 8/16/32-bit values become the unsigned type of the same width;
/// - `mediumint` columns arrive as `Int32` but only the low 3 bytes are
///   real, so `-4692783` must become `12084433` (2^24 complement), not
///   `4290274513` (2^32 complement);
/// - 64-bit values become decimal text so no binder has to hold a `u64`.
///
/// Signed columns and every non-signed-integer value pass through.
///

#[must_use]
pub fn cast_unsigned(value: Value, unsigned: bool, declared_type: &str) -> Value {
    if !unsigned {
        return value;
    }

    match value {
        Value::Int8(v) => Value::Uint8(v.cast_unsigned()),
        Value::Int16(v) => Value::Uint16(v.cast_unsigned()),
        Value::Int32(v) if is_mediumint(declared_type) => {
            let [b0, b1, b2, _] = v.to_le_bytes();
            Value::Uint32(u32::from_le_bytes([b0, b1, b2, 0]))
        }
        Value::Int32(v) => Value::Uint32(v.cast_unsigned()),
        Value::Int64(v) => Value::Text(v.cast_unsigned().to_string()),
        other => other,
    }
}

fn is_mediumint(declared_type: &str) -> bool {
    declared_type.to_ascii_lowercase().contains(MEDIUMINT)
}

/// Cast every value of a row against its column descriptor.
///
/// Callers check arity first; extra values past the catalog are kept as-is.
#[must_use]
pub fn cast_row(columns: &[Arc<Column>], row: &[Value]) -> Vec<Value> {
    row.iter()
        .enumerate()
        .map(|(i, value)| match columns.get(i) {
            Some(column) => cast_unsigned(value.clone(), column.unsigned, &column.declared_type),
            None => value.clone(),
        })
        .collect()
}

///
/// canonical_text
///
/// Deterministic text form of a value, used to build identity keys.
/// Two values render equal iff downstream conflict detection must treat
/// them as the same key component.
///

#[must_use]
pub fn canonical_text(value: &Value, unsigned: bool, declared_type: &str) -> String {
    match cast_unsigned(value.clone(), unsigned, declared_type) {
        Value::Null => "null".to_string(),
        Value::Bool(v) => String::from(if v { "1" } else { "0" }),
        Value::Int8(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Uint8(v) => v.to_string(),
        Value::Uint16(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Uint64(v) => v.to_string(),
        // `Display` for floats is the shortest text that round-trips at the
        // value's own precision, and never switches to exponent notation.
        // Non-finite values render as `inf`, `-inf` and `NaN`.
        Value::Float32(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Text(v) => v,
        Value::Bytes(v) => bytes_text(&v),
        other @ (Value::Decimal(_) | Value::Json(_)) => other.to_string(),
    }
}

// Valid UTF-8 runs are kept as-is; each invalid byte becomes `\xNN` and a
// literal backslash becomes `\\`, so distinct byte strings never collide.
fn bytes_text(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            if c == '\\' {
                out.push_str("\\\\");
            } else {
                out.push(c);
            }
        }
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }

    out
}

//! User-key values: comparison and conversion to an author column's type.

use sea_orm::{ColumnType, Value};

/// Key equality: integers compare by value across widths, null never matches.
pub(crate) fn same_key(left: &Value, right: &Value) -> bool {
    if is_null(left) || is_null(right) {
        return false;
    }
    match (as_integer(left), as_integer(right)) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

/// Convert an integer key to the integer type of `column_type`.
///
/// Non-integer keys and non-integer columns pass through unchanged. Returns
/// `None` when the key does not fit the column.
pub(crate) fn coerce_key(key: &Value, column_type: &ColumnType) -> Option<Value> {
    let Some(int) = as_integer(key) else {
        return Some(key.clone());
    };
    match column_type {
        ColumnType::TinyInteger => i8::try_from(int).ok().map(Value::from),
        ColumnType::SmallInteger => i16::try_from(int).ok().map(Value::from),
        ColumnType::Integer => i32::try_from(int).ok().map(Value::from),
        ColumnType::BigInteger => i64::try_from(int).ok().map(Value::from),
        ColumnType::TinyUnsigned => u8::try_from(int).ok().map(Value::from),
        ColumnType::SmallUnsigned => u16::try_from(int).ok().map(Value::from),
        ColumnType::Unsigned => u32::try_from(int).ok().map(Value::from),
        ColumnType::BigUnsigned => u64::try_from(int).ok().map(Value::from),
        _ => Some(key.clone()),
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    match *value {
        Value::TinyInt(Some(v)) => Some(v.into()),
        Value::SmallInt(Some(v)) => Some(v.into()),
        Value::Int(Some(v)) => Some(v.into()),
        Value::BigInt(Some(v)) => Some(v.into()),
        Value::TinyUnsigned(Some(v)) => Some(v.into()),
        Value::SmallUnsigned(Some(v)) => Some(v.into()),
        Value::Unsigned(Some(v)) => Some(v.into()),
        Value::BigUnsigned(Some(v)) => Some(v.into()),
        _ => None,
    }
}

pub(crate) fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
            | Value::Uuid(None)
    )
}

//! Typed lookups over a decoded MessagePack map.
//!
//! Lookups return `None` when the key is absent or its value has an
//! incompatible type. Numeric accessors convert between MessagePack integer
//! and float encodings so a sender may write `1` where a float is expected.

use rmpv::Value;

/// Borrowed view over the entries of a MessagePack map.
pub(super) struct FieldMap<'a> {
    entries: &'a [(Value, Value)],
}

impl<'a> FieldMap<'a> {
    pub(super) const fn new(entries: &'a [(Value, Value)]) -> Self { Self { entries } }

    /// First value stored under `key`. Non-string keys never match.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    pub(super) fn f64(&self, key: &str) -> Option<f64> { self.get(key).and_then(Value::as_f64) }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "float32 fields narrow whatever numeric encoding the sender chose"
    )]
    pub(super) fn f32(&self, key: &str) -> Option<f32> { self.f64(key).map(|v| v as f32) }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "int32 fields take the low bits of wider integers"
    )]
    pub(super) fn i32(&self, key: &str) -> Option<i32> { self.integer(key).map(|v| v as i32) }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "byte fields take the low eight bits of the encoded integer"
    )]
    pub(super) fn u8(&self, key: &str) -> Option<u8> { self.integer(key).map(|v| v as u8) }

    pub(super) fn string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_owned)
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "numeric coercion mirrors a C-style cast between encodings"
    )]
    fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Integer(n) => n.as_i64().or_else(|| n.as_u64().map(|u| u as i64)),
            Value::F32(f) => Some(*f as i64),
            Value::F64(f) => Some(*f as i64),
            _ => None,
        }
    }
}

/// Short type name used in diagnostics.
pub(super) const fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::F32(_) | Value::F64(_) => "float",
        Value::String(_) => "string",
        Value::Binary(_) => "binary",
        Value::Array(_) => "array",
        Value::Map(_) => "map",
        Value::Ext(..) => "extension",
    }
}

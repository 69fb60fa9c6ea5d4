//! Permissive field extraction for response payloads.
//!
//! The remote host does not guarantee which fields it populates, so a
//! missing or malformed field never raises: numbers fall back to `-1`,
//! strings to `""`, booleans to `false`.

use serde_json::Value;

static NULL: Value = Value::Null;

/// Sentinel for numeric fields that are missing or unparseable
pub const MISSING_NUMBER: i64 = -1;

/// Lenient integer read: JSON integers, integral floats and numeric strings.
pub fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Lenient boolean read: JSON booleans and `"true"`/`"false"` in any case.
pub fn lenient_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Lenient string read: strings as-is, scalars as their JSON text.
pub fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Field accessors with the sentinel defaulting policy.
pub trait PermissiveFields {
    /// The field, or JSON null when absent or when `self` is not an object
    fn field(&self, key: &str) -> &Value;

    fn i64_field(&self, key: &str) -> i64 {
        lenient_i64(self.field(key)).unwrap_or(MISSING_NUMBER)
    }

    /// As [`i64_field`](Self::i64_field), but out-of-range values are also `-1`
    fn i32_field(&self, key: &str) -> i32 {
        lenient_i64(self.field(key))
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(MISSING_NUMBER as i32)
    }

    fn str_field(&self, key: &str) -> String {
        self.opt_str_field(key).unwrap_or_default()
    }

    fn opt_str_field(&self, key: &str) -> Option<String> {
        lenient_string(self.field(key))
    }

    fn bool_field(&self, key: &str) -> bool {
        lenient_bool(self.field(key)).unwrap_or(false)
    }
}

impl PermissiveFields for Value {
    fn field(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

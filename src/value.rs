//! Typed values and coercion from raw input

use serde_json::Value as JsonValue;
use std::fmt;

use crate::config::ValueType;
use crate::error::{Error, Result};

/// 2^64, the first float that no longer fits in a `u64`.
const U64_LIMIT_F64: f64 = 18_446_744_073_709_551_616.0;

/// A resolved, typed configuration value
///
/// The declared type travels with integers so a `uint8` value is never
/// mistaken for a wider one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    String(String),
    Uint { ty: ValueType, value: u64 },
}

impl Value {
    /// Declared type this value was coerced into
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Uint { ty, .. } => *ty,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Uint { .. } => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::String(_) => None,
            Value::Uint { value, .. } => Some(*value),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Uint { value, .. } => write!(f, "{value}"),
        }
    }
}

impl ValueType {
    /// Coerce a raw string (environment variable or flag) into this type
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the input is not a base-10 unsigned
    /// integer or exceeds the declared width.
    pub fn coerce_str(self, name: &str, raw: &str) -> Result<Value> {
        if self == ValueType::String {
            return Ok(Value::String(raw.to_string()));
        }

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::parse(
                name,
                raw,
                format!("expected a base-10 {self}"),
            ));
        }

        let value = raw
            .parse::<u64>()
            .map_err(|_| Error::parse(name, raw, format!("out of range for {self}")))?;
        self.checked_uint(name, raw, value)
    }

    /// Coerce an untyped JSON default into this type
    ///
    /// `null` means "no default". Floating-point numbers are truncated toward
    /// zero for the unsigned family once they are known to fit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for negative, non-finite, out-of-range or
    /// structured defaults.
    pub fn coerce_json(self, name: &str, raw: &JsonValue) -> Result<Option<Value>> {
        let value = match (self, raw) {
            (_, JsonValue::Null) => return Ok(None),
            (_, JsonValue::Array(_) | JsonValue::Object(_)) => {
                return Err(Error::parse(
                    name,
                    raw.to_string(),
                    "structured defaults are not supported",
                ));
            }

            (ValueType::String, JsonValue::String(s)) => Value::String(s.clone()),
            (ValueType::String, other) => Value::String(other.to_string()),

            (_, JsonValue::String(s)) => self.coerce_str(name, s)?,
            (_, JsonValue::Bool(_)) => {
                return Err(Error::parse(
                    name,
                    raw.to_string(),
                    format!("expected a {self} default"),
                ));
            }
            (_, JsonValue::Number(n)) => {
                if let Some(u) = n.as_u64() {
                    self.checked_uint(name, &n.to_string(), u)?
                } else if n.is_i64() {
                    return Err(Error::parse(
                        name,
                        n.to_string(),
                        format!("negative default for {self}"),
                    ));
                } else {
                    let f = n.as_f64().unwrap_or(f64::NAN);
                    if !f.is_finite() || f < 0.0 || f >= U64_LIMIT_F64 {
                        return Err(Error::parse(
                            name,
                            n.to_string(),
                            format!("out of range for {self}"),
                        ));
                    }
                    self.checked_uint(name, &n.to_string(), f.trunc() as u64)?
                }
            }
        };
        Ok(Some(value))
    }

    fn checked_uint(self, name: &str, raw: &str, value: u64) -> Result<Value> {
        match self.max_value() {
            Some(max) if value <= max => Ok(Value::Uint { ty: self, value }),
            Some(max) => Err(Error::parse(
                name,
                raw,
                format!("out of range for {self} (max {max})"),
            )),
            None => Ok(Value::String(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uint(ty: ValueType, value: u64) -> Value {
        Value::Uint { ty, value }
    }

    #[test]
    fn test_coerce_str_all_types() {
        for ty in ValueType::ALL {
            let value = ty.coerce_str("arg", "123").unwrap();
            if ty.is_uint() {
                assert_eq!(value, uint(ty, 123), "{ty}");
            } else {
                assert_eq!(value, Value::String("123".into()));
            }
        }
    }

    #[test]
    fn test_coerce_str_rejects_non_numeric() {
        for raw in ["abc", "", "-1", "+5", " 7", "1.5", "0x10"] {
            let err = ValueType::Uint.coerce_str("port", raw).unwrap_err();
            match err {
                Error::Parse { name, raw: got, .. } => {
                    assert_eq!(name, "port");
                    assert_eq!(got, raw);
                }
                other => panic!("unexpected error for {raw:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_coerce_str_width_limits() {
        assert_eq!(
            ValueType::Uint8.coerce_str("a", "255").unwrap(),
            uint(ValueType::Uint8, 255)
        );
        assert!(ValueType::Uint8.coerce_str("a", "256").is_err());
        assert!(ValueType::Uint16.coerce_str("a", "65536").is_err());
        assert!(ValueType::Uint32.coerce_str("a", "4294967296").is_err());
        assert_eq!(
            ValueType::Uint64
                .coerce_str("a", "18446744073709551615")
                .unwrap(),
            uint(ValueType::Uint64, u64::MAX)
        );
        assert!(ValueType::Uint.coerce_str("a", "18446744073709551616").is_err());
    }

    #[test]
    fn test_coerce_json_float_default_is_truncated() {
        assert_eq!(
            ValueType::Uint32.coerce_json("a", &json!(123.0)).unwrap(),
            Some(uint(ValueType::Uint32, 123))
        );
        assert_eq!(
            ValueType::Uint.coerce_json("a", &json!(8080.9)).unwrap(),
            Some(uint(ValueType::Uint, 8080))
        );
    }

    #[test]
    fn test_coerce_json_rejects_bad_defaults() {
        assert!(ValueType::Uint.coerce_json("a", &json!(-1)).is_err());
        assert!(ValueType::Uint.coerce_json("a", &json!(-0.5)).is_err());
        assert!(ValueType::Uint8.coerce_json("a", &json!(300)).is_err());
        assert!(ValueType::Uint8.coerce_json("a", &json!(255.5)).is_ok());
        assert!(ValueType::Uint.coerce_json("a", &json!(true)).is_err());
        assert!(ValueType::Uint.coerce_json("a", &json!([1])).is_err());
        assert!(ValueType::String.coerce_json("a", &json!({"k": 1})).is_err());
    }

    #[test]
    fn test_coerce_json_null_and_strings() {
        assert_eq!(ValueType::Uint.coerce_json("a", &JsonValue::Null).unwrap(), None);
        assert_eq!(
            ValueType::Uint16.coerce_json("a", &json!("443")).unwrap(),
            Some(uint(ValueType::Uint16, 443))
        );
        assert_eq!(
            ValueType::String.coerce_json("a", &json!("foo")).unwrap(),
            Some(Value::String("foo".into()))
        );
        assert_eq!(
            ValueType::String.coerce_json("a", &json!(true)).unwrap(),
            Some(Value::String("true".into()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(uint(ValueType::Uint8, 7).to_string(), "7");
        assert_eq!(Value::String("x".into()).to_string(), "x");
    }
}

//! Value types an option or positional can bind, and their coercion from
//! raw command-line strings.

use std::fmt;

use serde::Serialize;

use crate::error::CoercionError;

pub const DEFAULT_CATEGORY: &str = "General";

/// Closed set of primitive types an option or positional can bind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Boolean => "boolean",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ValueType::Boolean)
    }

    /// Parse a raw command-line string into a typed value.
    pub fn coerce(&self, raw: &str) -> Result<Value, CoercionError> {
        let err = || CoercionError {
            value: raw.to_string(),
            expected: *self,
        };
        match self {
            ValueType::String => Ok(Value::String(raw.to_string())),
            ValueType::Integer => raw.parse().map(Value::Integer).map_err(|_| err()),
            ValueType::Long => raw.parse().map(Value::Long).map_err(|_| err()),
            ValueType::Float => raw.parse().map(Value::Float).map_err(|_| err()),
            ValueType::Double => raw.parse().map(Value::Double).map_err(|_| err()),
            ValueType::Boolean => parse_bool(raw).map(Value::Boolean).ok_or_else(err),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A coerced value, ready to be handed to a binder.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    String(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
}

/// Rust types a binder closure can receive.
///
/// Ties a setter's parameter type to its [`ValueType`] so descriptors can be
/// declared with plain closures such as `|cmd: &mut Run, n: i32| cmd.count = n`.
pub trait OptionValue: Sized {
    const TYPE: ValueType;

    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! option_value {
    ($ty:ty, $variant:ident) => {
        impl OptionValue for $ty {
            const TYPE: ValueType = ValueType::$variant;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

option_value!(String, String);
option_value!(i32, Integer);
option_value!(i64, Long);
option_value!(f32, Float);
option_value!(f64, Double);
option_value!(bool, Boolean);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerces_each_primitive() {
        assert_eq!(
            ValueType::String.coerce("abc").unwrap(),
            Value::String("abc".into())
        );
        assert_eq!(ValueType::Integer.coerce("42").unwrap(), Value::Integer(42));
        assert_eq!(
            ValueType::Long.coerce("-9000000000").unwrap(),
            Value::Long(-9_000_000_000)
        );
        assert_eq!(ValueType::Float.coerce("1.5").unwrap(), Value::Float(1.5));
        assert_eq!(ValueType::Double.coerce("2.25").unwrap(), Value::Double(2.25));
        assert_eq!(
            ValueType::Boolean.coerce("TRUE").unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            ValueType::Boolean.coerce("off").unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn test_rejects_unparseable_values() {
        let err = ValueType::Integer.coerce("notanumber").unwrap_err();
        assert_eq!(err.value, "notanumber");
        assert_eq!(err.expected, ValueType::Integer);

        // i32 overflow is a coercion error, not a wrap
        assert!(ValueType::Integer.coerce("9000000000").is_err());
        assert!(ValueType::Double.coerce("1,5").is_err());
        assert!(ValueType::Boolean.coerce("maybe").is_err());
    }

    #[test]
    fn test_same_digits_coerce_per_type() {
        assert_eq!(ValueType::String.coerce("7").unwrap(), Value::String("7".into()));
        assert_eq!(ValueType::Integer.coerce("7").unwrap(), Value::Integer(7));
        assert_eq!(ValueType::Long.coerce("7").unwrap(), Value::Long(7));
        assert_eq!(ValueType::Float.coerce("7").unwrap(), Value::Float(7.0));
        assert_eq!(ValueType::Double.coerce("7").unwrap(), Value::Double(7.0));
        assert_eq!(ValueType::Boolean.coerce("1").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_option_value_unwraps_matching_variant_only() {
        assert_eq!(i32::from_value(Value::Integer(3)), Some(3));
        assert_eq!(i32::from_value(Value::Long(3)), None);
        assert_eq!(
            String::from_value(Value::String("x".into())),
            Some("x".to_string())
        );
        assert_eq!(<bool as OptionValue>::TYPE, ValueType::Boolean);
    }
}

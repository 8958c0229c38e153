//! Kinds of raw JSON values
//!
//! Used to describe what was actually found when a value has the wrong shape.

use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

/// The six kinds a decoded JSON value can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RawKind {
    /// JSON `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// Any JSON number
    Number,
    /// A JSON string
    String,
    /// An ordered sequence of values
    Array,
    /// A string-keyed mapping
    Object,
}

impl RawKind {
    /// Classify a raw value
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl From<RawKind> for Value {
    fn from(kind: RawKind) -> Self {
        Self::String(kind.as_ref().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_of_each_value() {
        assert_eq!(RawKind::of(&json!(null)), RawKind::Null);
        assert_eq!(RawKind::of(&json!(true)), RawKind::Boolean);
        assert_eq!(RawKind::of(&json!(1.5)), RawKind::Number);
        assert_eq!(RawKind::of(&json!("x")), RawKind::String);
        assert_eq!(RawKind::of(&json!([1])), RawKind::Array);
        assert_eq!(RawKind::of(&json!({"a": 1})), RawKind::Object);
    }

    #[test]
    fn test_kind_display_round_trip() {
        assert_eq!(RawKind::Object.to_string(), "object");
        assert!(matches!(RawKind::from_str("boolean"), Ok(RawKind::Boolean)));
        assert!(RawKind::from_str("float").is_err());
        assert_eq!(Value::from(RawKind::Array), json!("array"));
    }
}

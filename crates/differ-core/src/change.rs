//! Change representation for record diffs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type-erased field value carried by a [`Change`]
///
/// Absent optionals are [`Value::Null`]; present optionals use the variant
/// of the value they hold.
/// Equality treats two `NaN`s of the same width as equal, matching how
/// field values are compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    /// Signed integers up to 64 bits
    Int(i64),
    /// Unsigned integers up to 64 bits
    #[serde(rename = "uint")]
    UInt(u64),
    Float(f64),
    #[serde(rename = "float32")]
    Float32(f32),
    Char(char),
    Text(String),
    /// Enumeration value, stored as its variant name
    Enum(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Float32(a), Value::Float32(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) | (Value::Enum(a), Value::Enum(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Float32(x) => write!(f, "{}", x),
            Value::Char(c) => write!(f, "{}", c),
            Value::Text(s) | Value::Enum(s) => f.write_str(s),
        }
    }
}

/// One field that differs between two instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    name: String,
    previous_value: Value,
    new_value: Value,
}

impl Change {
    pub fn new(name: impl Into<String>, previous_value: Value, new_value: Value) -> Self {
        Self {
            name: name.into(),
            previous_value,
            new_value,
        }
    }

    /// Display name of the field
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value on the original instance
    pub fn previous_value(&self) -> &Value {
        &self.previous_value
    }

    /// Value on the changed instance
    pub fn new_value(&self) -> &Value {
        &self.new_value
    }

    /// Check if the field went from absent to present
    pub fn is_set(&self) -> bool {
        self.previous_value.is_null() && !self.new_value.is_null()
    }

    /// Check if the field went from present to absent
    pub fn is_cleared(&self) -> bool {
        !self.previous_value.is_null() && self.new_value.is_null()
    }

    pub fn into_parts(self) -> (String, Value, Value) {
        (self.name, self.previous_value, self.new_value)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.previous_value, self.new_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_change() {
        let change = Change::new("age", Value::Int(30), Value::Int(31));
        assert_eq!(change.to_string(), "age: 30 -> 31");
    }

    #[test]
    fn test_display_null_and_enum() {
        let change = Change::new("status", Value::Null, Value::Enum("Active".into()));
        assert_eq!(change.to_string(), "status: null -> Active");
        assert!(change.is_set());
        assert!(!change.is_cleared());
    }

    #[test]
    fn test_nan_values_are_equal() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float32(f32::NAN), Value::Float32(f32::NAN));
        assert_ne!(Value::Float(f64::NAN), Value::Float(1.0));
        assert_ne!(Value::Float(1.0), Value::Float32(1.0));
        assert_ne!(Value::Text("A".into()), Value::Enum("A".into()));

        let change = Change::new("ratio", Value::Float(f64::NAN), Value::Float(0.5));
        assert_eq!(change.clone(), change);
    }

    #[test]
    fn test_display_f32_without_widening() {
        let change = Change::new("ratio", Value::Float32(0.0), Value::Float32(0.1));
        assert_eq!(change.to_string(), "ratio: 0 -> 0.1");
    }

    #[test]
    fn test_serialized_shape() {
        let change = Change::new("count", Value::UInt(1), Value::Null);
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "count",
                "previous_value": { "kind": "uint", "value": 1 },
                "new_value": { "kind": "null" },
            })
        );
    }
}

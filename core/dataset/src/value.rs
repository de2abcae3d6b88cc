//! FILENAME: core/dataset/src/value.rs
//! PURPOSE: Defines the value a single record field can hold.
//! CONTEXT: Records are loosely typed. A field may carry a number, a piece of
//! text, a boolean, or nothing at all. Axis fields accept any of these; the
//! value field must be numeric-coercible (see `Value::as_number`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the raw content of one record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl Value {
    /// Wraps a raw text cell (e.g. from CSV). Blank input becomes `Empty`;
    /// anything else is kept verbatim as `Text`, so labels such as "007" and
    /// "7" stay distinct. Numeric text is still summable via `as_number`.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Value::Empty
        } else {
            Value::Text(raw.to_string())
        }
    }

    /// Coerces the value to a number for summing.
    /// Returns None for text that does not parse as a float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Empty => Some(0.0),
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns the display value as a String.
    pub fn display_value(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Empty
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_value())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

/// Formats a number without unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        assert_eq!(Value::from_raw(""), Value::Empty);
        assert_eq!(Value::from_raw("   "), Value::Empty);
        assert_eq!(Value::from_raw("007"), Value::Text("007".to_string()));
        assert_eq!(Value::from_raw("1.50"), Value::Text("1.50".to_string()));
        assert_eq!(Value::from_raw("Infinity").display_value(), "Infinity");
        assert_eq!(Value::from_raw("North"), Value::Text("North".to_string()));
        assert_ne!(Value::from_raw("007"), Value::from_raw("7"));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Value::Number(3.5).as_number(), Some(3.5));
        assert_eq!(Value::Text(" 12 ".to_string()).as_number(), Some(12.0));
        assert_eq!(Value::Text("twelve".to_string()).as_number(), None);
        assert_eq!(Value::Empty.as_number(), Some(0.0));
        assert_eq!(Value::Boolean(true).as_number(), Some(1.0));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(Value::Number(10.0).display_value(), "10");
        assert_eq!(Value::Number(-2.25).display_value(), "-2.25");
        assert_eq!(Value::Empty.display_value(), "");
        assert_eq!(Value::Boolean(false).display_value(), "FALSE");
        assert_eq!(Value::from("Jan").to_string(), "Jan");
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, 7, 2.5, "x", true]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Empty,
                Value::Number(7.0),
                Value::Number(2.5),
                Value::Text("x".to_string()),
                Value::Boolean(true),
            ]
        );
    }
}

//! Raw input and canonical value types.
//!
//! Callers hand the container loosely typed data (`RawValue`, a JSON value so
//! that any parsed source maps onto it). Validators turn each raw value into a
//! [`Value`], the closed set of shapes a setting can settle on.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A caller-supplied, not yet validated value.
pub type RawValue = serde_json::Value;

/// A caller-supplied mapping from setting name to raw value.
pub type RawInput = serde_json::Map<String, RawValue>;

/// The literal stored for any ask-alias.
pub const ASK: &str = "ask";

/// A canonical, validated setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    String(String),
    List(Vec<String>),
    Table(BTreeMap<String, Value>),
}

impl Value {
    /// The `"ask"` sentinel.
    pub fn ask() -> Self {
        Value::String(ASK.to_string())
    }

    pub fn is_ask(&self) -> bool {
        matches!(self, Value::String(s) if s == ASK)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Convert into the equivalent TOML value.
    pub fn to_toml(&self) -> toml::Value {
        match self {
            Value::Bool(b) => toml::Value::Boolean(*b),
            Value::Integer(i) => toml::Value::Integer(*i),
            Value::String(s) => toml::Value::String(s.clone()),
            Value::List(items) => toml::Value::Array(
                items
                    .iter()
                    .map(|s| toml::Value::String(s.clone()))
                    .collect(),
            ),
            Value::Table(t) => toml::Value::Table(
                t.iter()
                    .map(|(k, v)| (k.clone(), v.to_toml()))
                    .collect(),
            ),
        }
    }

    /// Convert back into a raw value, e.g. to feed a canonical value through
    /// its validator again.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Integer(i) => RawValue::from(*i),
            Value::String(s) => RawValue::String(s.clone()),
            Value::List(items) => {
                RawValue::Array(items.iter().cloned().map(RawValue::String).collect())
            }
            Value::Table(t) => RawValue::Object(
                t.iter()
                    .map(|(k, v)| (k.clone(), v.to_raw()))
                    .collect(),
            ),
        }
    }
}

/// Scalars print bare; lists and tables print as inline TOML.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{}", other.to_toml()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(t: BTreeMap<String, Value>) -> Self {
        Value::Table(t)
    }
}

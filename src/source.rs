//! Turn configuration text into a [`RawInput`].
//!
//! Reading files is the caller's job; these functions only parse. Both formats
//! must have a table at the top level.

use crate::error::ConfigError;
use crate::value::{RawInput, RawValue};

/// Parse TOML text into raw input.
///
/// Datetimes become their string form. Non-finite floats (`nan`, `inf`) have
/// no JSON counterpart and become `null`.
pub fn parse_toml(content: &str) -> Result<RawInput, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(table
        .into_iter()
        .map(|(k, v)| (k, toml_to_raw(v)))
        .collect())
}

/// Parse JSON text into raw input.
pub fn parse_json(content: &str) -> Result<RawInput, ConfigError> {
    match serde_json::from_str::<RawValue>(content)? {
        RawValue::Object(map) => Ok(map),
        _ => Err(ConfigError::NotATable),
    }
}

fn toml_to_raw(value: toml::Value) -> RawValue {
    match value {
        toml::Value::String(s) => RawValue::String(s),
        toml::Value::Integer(i) => RawValue::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(RawValue::Number)
            .unwrap_or(RawValue::Null),
        toml::Value::Boolean(b) => RawValue::Bool(b),
        toml::Value::Datetime(dt) => RawValue::String(dt.to_string()),
        toml::Value::Array(items) => RawValue::Array(items.into_iter().map(toml_to_raw).collect()),
        toml::Value::Table(t) => {
            RawValue::Object(t.into_iter().map(|(k, v)| (k, toml_to_raw(v))).collect())
        }
    }
}

//! Config operations: template generation, key lookup, listing, and result types.
//!
//! Provides the logic behind [`ConfigAction::List`](crate::ConfigAction::List),
//! [`Gen`](crate::ConfigAction::Gen) and [`Get`](crate::ConfigAction::Get), and
//! the `ConfigResult` enum that callers use to display results.

use std::fmt;

use toml_edit::DocumentMut;

use crate::config::Config;
use crate::error::ConfigError;
use crate::rules::Setting;
use crate::value::Value;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A generated TOML template string.
    Template(String),
    /// A key's canonical value and its doc comment.
    KeyValue {
        key: String,
        value: String,
        doc: Vec<String>,
    },
    /// All canonical key-value pairs, in key order.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::KeyValue { key, value, doc } => {
                for line in doc {
                    writeln!(f, "# {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Generate a commented TOML template covering the whole catalogue.
///
/// Settings with a default are written as live `key = default` lines. Settings
/// without one are appended as commented-out examples, so parsing the template
/// yields exactly the defaults.
pub fn generate_template() -> String {
    let mut doc = DocumentMut::new();
    let mut hints = String::new();

    for setting in Setting::ALL {
        match setting.default_value() {
            Some(default) => {
                let lead = if doc.is_empty() { "" } else { "\n" };
                doc.insert(setting.name(), toml_edit::value(to_edit_value(&default)));
                if let Some(mut key) = doc.key_mut(setting.name()) {
                    key.leaf_decor_mut()
                        .set_prefix(format!("{lead}# {}\n", setting.doc()));
                }
            }
            None => {
                hints.push_str(&format!(
                    "\n# {}\n# {} = {}\n",
                    setting.doc(),
                    setting.name(),
                    example(setting)
                ));
            }
        }
    }

    doc.set_trailing(hints);
    doc.to_string()
}

/// Example values for settings that have no default.
fn example(setting: Setting) -> &'static str {
    match setting {
        Setting::Verbosity => "2",
        Setting::GitignoreRules => r#"{ wp = true, vendor = true, custom = { logs = "*.log" } }"#,
        Setting::CustomSteps => r#"["Vendor\\Installer\\MyStep"]"#,
        Setting::Scripts => r#"{ post-install = ["my_callback"] }"#,
        _ => "...",
    }
}

fn to_edit_value(value: &Value) -> toml_edit::Value {
    match value {
        Value::Bool(b) => (*b).into(),
        Value::Integer(i) => (*i).into(),
        Value::String(s) => s.as_str().into(),
        Value::List(items) => toml_edit::Value::Array(items.iter().map(String::as_str).collect()),
        Value::Table(t) => toml_edit::Value::InlineTable(
            t.iter()
                .map(|(k, v)| (k.as_str(), to_edit_value(v)))
                .collect(),
        ),
    }
}

/// Get a config value by key, including its doc comment.
pub fn get_value(config: &Config, key: &str) -> Result<ConfigResult, ConfigError> {
    let value = config
        .get(key)
        .ok_or_else(|| ConfigError::KeyNotFound(key.into()))?;

    let doc = Setting::from_name(key)
        .map(|s| vec![s.doc().to_string()])
        .unwrap_or_default();

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: value.to_string(),
        doc,
    })
}

/// List all canonical config values.
pub fn list_values(config: &Config) -> ConfigResult {
    let entries = config
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    ConfigResult::Listing { entries }
}

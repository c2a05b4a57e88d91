//! The immutable configuration container.
//!
//! A [`Config`] is resolved once and then only read. The map-like mutators
//! [`set`](Config::set) and [`remove`](Config::remove) exist only to report the
//! violation; the single way in is the extension path,
//! [`append`](Config::append) / [`append_with`](Config::append_with), which
//! refuses keys that are already present.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::builder::ConfigBuilder;
use crate::error::ConfigError;
use crate::ops::{self, ConfigResult};
use crate::registry::{StaticRegistry, TypeRegistry};
use crate::resolve;
use crate::rules::{Context, Outcome, Setting};
use crate::types::ConfigAction;
use crate::value::{RawInput, RawValue, Value};

/// Shared handle to whatever answers step and callback queries.
pub type SharedRegistry = Arc<dyn TypeRegistry + Send + Sync>;

/// Validated, read-only installer configuration.
#[derive(Clone)]
pub struct Config {
    entries: BTreeMap<String, Value>,
    registry: SharedRegistry,
}

impl Config {
    /// Resolve `input` with an empty [`StaticRegistry`]: no custom step or
    /// script survives validation. Use [`Config::builder`] to supply one.
    pub fn new(input: RawInput) -> Self {
        let registry: SharedRegistry = Arc::new(StaticRegistry::new());
        Self::resolved(&input, registry)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub(crate) fn resolved(input: &RawInput, registry: SharedRegistry) -> Self {
        let entries = resolve::resolve(input, registry.as_ref());
        Self { entries, registry }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Typed lookup for catalogue settings.
    pub fn setting(&self, setting: Setting) -> Option<&Value> {
        self.get(setting.name())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Always fails: values cannot be assigned after construction.
    pub fn set(&self, key: &str, _value: impl Into<Value>) -> Result<(), ConfigError> {
        Err(ConfigError::Immutable { key: key.into() })
    }

    /// Always fails: values cannot be removed after construction.
    pub fn remove(&self, key: &str) -> Result<(), ConfigError> {
        Err(ConfigError::Immutable { key: key.into() })
    }

    /// Add a catalogue setting that is not present yet, validated by the
    /// catalogue's own rule.
    ///
    /// Returns `Ok(true)` if the value was accepted and inserted, `Ok(false)`
    /// if the validator rejected it. Errors with [`ConfigError::Frozen`] when
    /// the key exists and [`ConfigError::ValidatorRequired`] when the key is
    /// not in the catalogue.
    pub fn append(&mut self, key: &str, value: RawValue) -> Result<bool, ConfigError> {
        self.ensure_absent(key)?;
        let setting = Setting::from_name(key)
            .ok_or_else(|| ConfigError::ValidatorRequired { key: key.into() })?;

        let mut input = RawInput::new();
        input.insert(key.to_string(), value);
        let outcome = {
            let ctx = Context::new(&input, self.registry.as_ref());
            setting.validate(&input[key], &ctx)
        };

        match outcome {
            Outcome::Accept(value) => {
                self.entries.insert(key.to_string(), value);
                Ok(true)
            }
            Outcome::UseDefault | Outcome::Reject => {
                debug!(key, "appended value rejected");
                Ok(false)
            }
        }
    }

    /// Add a key that is not present yet, validated by `validator`.
    ///
    /// A `None` from the validator leaves the config unchanged and returns
    /// `Ok(false)`. The only error is [`ConfigError::Frozen`].
    pub fn append_with<F>(
        &mut self,
        key: &str,
        value: RawValue,
        validator: F,
    ) -> Result<bool, ConfigError>
    where
        F: FnOnce(&RawValue) -> Option<Value>,
    {
        self.ensure_absent(key)?;
        match validator(&value) {
            Some(canonical) => {
                self.entries.insert(key.to_string(), canonical);
                Ok(true)
            }
            None => {
                debug!(key, "appended value rejected");
                Ok(false)
            }
        }
    }

    fn ensure_absent(&self, key: &str) -> Result<(), ConfigError> {
        if self.contains_key(key) {
            return Err(ConfigError::Frozen { key: key.into() });
        }
        Ok(())
    }

    /// Handle a read-only [`ConfigAction`].
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, ConfigError> {
        match action {
            ConfigAction::List => Ok(ops::list_values(self)),
            ConfigAction::Gen => Ok(ConfigResult::Template(ops::generate_template())),
            ConfigAction::Get { key } => ops::get_value(self, key),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Index<&str> for Config {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `key` is absent, like `HashMap`'s `Index`.
    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no config value for '{key}'"),
        }
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! [`ConfigBuilder`]: collects a registry and layered sources, then resolves
//! them into a frozen [`Config`].

use std::sync::Arc;

use crate::config::{Config, SharedRegistry};
use crate::error::ConfigError;
use crate::merge::deep_merge;
use crate::registry::{StaticRegistry, TypeRegistry};
use crate::source;
use crate::value::RawInput;

/// One layer of raw configuration, parsed lazily at build time.
enum Source {
    Raw(RawInput),
    Toml(String),
    Json(String),
}

/// Builder for assembling layered raw input into a [`Config`].
///
/// - **Registry**: [`registry()`](Self::registry) — what answers step and
///   callback queries. Defaults to an empty [`StaticRegistry`].
/// - **Sources**: [`input()`](Self::input), [`toml_str()`](Self::toml_str),
///   [`json_str()`](Self::json_str) — in **priority-ascending** order; later
///   layers override earlier ones key by key, nested mappings merge.
pub struct ConfigBuilder {
    registry: SharedRegistry,
    sources: Vec<Source>,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self {
            registry: Arc::new(StaticRegistry::new()),
            sources: Vec::new(),
        }
    }

    /// Set the type registry used by the `custom-steps` and `scripts` rules.
    pub fn registry<R>(mut self, registry: R) -> Self
    where
        R: TypeRegistry + Send + Sync + 'static,
    {
        self.registry = Arc::new(registry);
        self
    }

    /// Like [`registry`](Self::registry), for a registry that is already shared.
    pub fn shared_registry(mut self, registry: SharedRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Add an already-parsed layer.
    pub fn input(mut self, input: RawInput) -> Self {
        self.sources.push(Source::Raw(input));
        self
    }

    /// Add a TOML layer. Parsed by [`build()`](Self::build).
    pub fn toml_str(mut self, content: &str) -> Self {
        self.sources.push(Source::Toml(content.to_string()));
        self
    }

    /// Add a JSON layer. Parsed by [`build()`](Self::build); the top level
    /// must be an object.
    pub fn json_str(mut self, content: &str) -> Self {
        self.sources.push(Source::Json(content.to_string()));
        self
    }

    /// Parse and deep-merge every layer, lowest priority first.
    fn merged_input(sources: Vec<Source>) -> Result<RawInput, ConfigError> {
        let mut merged = RawInput::new();
        for src in sources {
            let layer = match src {
                Source::Raw(input) => input,
                Source::Toml(content) => source::parse_toml(&content)?,
                Source::Json(content) => source::parse_json(&content)?,
            };
            merged = deep_merge(merged, layer);
        }
        Ok(merged)
    }

    /// Resolve the layers into a frozen [`Config`].
    ///
    /// Only unparseable sources fail. Invalid setting values never do; they
    /// fall back to defaults or are left out.
    pub fn build(self) -> Result<Config, ConfigError> {
        let input = Self::merged_input(self.sources)?;
        Ok(Config::resolved(&input, self.registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{raw, registry};
    use crate::value::Value;
    use serde_json::json;

    #[test]
    fn no_sources_gives_defaults() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config, Config::new(RawInput::new()));
        assert_eq!(config["unknown-dropins"], Value::ask());
    }

    #[test]
    fn later_layers_win() {
        let config = Config::builder()
            .toml_str("verbosity = 0\ngitignore = \"ask\"\n")
            .json_str(r#"{"verbosity": 2}"#)
            .build()
            .unwrap();
        assert_eq!(config["verbosity"], Value::Integer(2));
        assert_eq!(config["gitignore"], Value::ask());
    }

    #[test]
    fn nested_layers_merge_before_validation() {
        let config = Config::builder()
            .registry(registry())
            .toml_str("[scripts]\npre-install = \"notify\"\n")
            .input(raw(json!({"scripts": {"post-install": ["cleanup"]}})))
            .build()
            .unwrap();
        let scripts = config["scripts"].as_table().unwrap();
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts["post-install"], Value::List(vec!["cleanup".into()]));
    }

    #[test]
    fn cross_field_rule_sees_merged_input() {
        let config = Config::builder()
            .toml_str("register-theme-folder = true\n")
            .json_str(r#"{"move-content": true}"#)
            .build()
            .unwrap();
        assert_eq!(config["move-content"], Value::Bool(false));
    }

    #[test]
    fn registry_enables_custom_steps() {
        let input = raw(json!({"custom-steps": ["Acme\\BuildStep"]}));
        let without = Config::builder().input(input.clone()).build().unwrap();
        assert!(!without.contains_key("custom-steps"));

        let with = Config::builder()
            .registry(registry())
            .input(input)
            .build()
            .unwrap();
        assert_eq!(
            with["custom-steps"],
            Value::List(vec!["Acme\\BuildStep".into()])
        );
    }

    #[test]
    fn shared_registry_is_reused() {
        let shared: SharedRegistry = Arc::new(registry());
        let config = Config::builder()
            .shared_registry(Arc::clone(&shared))
            .input(raw(json!({"scripts": {"pre-x": "notify"}})))
            .build()
            .unwrap();
        assert!(config.contains_key("scripts"));
        assert_eq!(Arc::strong_count(&shared), 2);
    }

    #[test]
    fn bad_toml_fails_build() {
        let err = Config::builder().toml_str("= nope").build().unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml(_)));
    }

    #[test]
    fn non_object_json_fails_build() {
        let err = Config::builder().json_str("true").build().unwrap_err();
        assert!(matches!(err, ConfigError::NotATable));
    }

    #[test]
    fn invalid_values_do_not_fail_build() {
        let config = Config::builder()
            .toml_str("verbosity = 9\nenv-file = 3\ncontent-dev-op = \"teleport\"\n")
            .build()
            .unwrap();
        assert!(!config.contains_key("verbosity"));
        assert_eq!(config["env-file"], Value::from(".env"));
        assert_eq!(config["content-dev-op"], Value::from("symlink"));
    }
}

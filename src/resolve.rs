//! Core construction pipeline: apply the frozen catalogue to one raw input.
//!
//! Operates on already-merged data with no I/O, so the whole algorithm is
//! testable with `json!` literals. Steps:
//!
//! 1. Start from every setting's default
//! 2. Validate each catalogue key present in the input, with the full input as context
//! 3. Accepted values overwrite; `UseDefault` and `Reject` keep the default or leave the key absent
//! 4. Ignore input keys outside the catalogue

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::registry::TypeRegistry;
use crate::rules::{Context, Outcome, Setting};
use crate::value::{RawInput, Value};

/// Resolve the canonical entries for `input`.
pub fn resolve(input: &RawInput, registry: &dyn TypeRegistry) -> BTreeMap<String, Value> {
    let mut entries: BTreeMap<String, Value> = Setting::ALL
        .into_iter()
        .filter_map(|s| s.default_value().map(|v| (s.name().to_string(), v)))
        .collect();

    let ctx = Context::new(input, registry);

    for setting in Setting::ALL {
        let Some(raw) = input.get(setting.name()) else {
            continue;
        };
        match setting.validate(raw, &ctx) {
            Outcome::Accept(value) => {
                entries.insert(setting.name().to_string(), value);
            }
            Outcome::UseDefault => {
                debug!(key = setting.name(), "input requests the default value");
            }
            Outcome::Reject => {
                if setting.default_value().is_some() {
                    warn!(key = setting.name(), value = %raw, "invalid value, using default");
                } else {
                    warn!(key = setting.name(), value = %raw, "invalid value, setting omitted");
                }
            }
        }
    }

    for key in input.keys() {
        if Setting::from_name(key).is_none() {
            debug!(key = %key, "ignoring unknown config key");
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{canonical_defaults, raw, registry};
    use crate::registry::StaticRegistry;
    use serde_json::json;

    fn resolve_json(input: serde_json::Value) -> BTreeMap<String, Value> {
        resolve(&raw(input), &registry())
    }

    #[test]
    fn empty_input_yields_defaults_only() {
        let entries = resolve(&RawInput::new(), &StaticRegistry::new());
        for setting in Setting::ALL {
            assert_eq!(entries.get(setting.name()).cloned(), setting.default_value());
        }
    }

    #[test]
    fn canonical_input_round_trips() {
        let input = canonical_defaults();
        let entries = resolve(&input, &registry());
        for (key, value) in &input {
            assert_eq!(entries[key].to_raw(), *value, "{key}");
        }
    }

    #[test]
    fn invalid_value_falls_back_to_default() {
        let entries = resolve_json(json!({"env-file": 42, "content-dev-op": "teleport"}));
        assert_eq!(entries["env-file"], Value::from(".env"));
        assert_eq!(entries["content-dev-op"], Value::from("symlink"));
    }

    #[test]
    fn explicit_default_request_keeps_default() {
        let entries = resolve_json(json!({"content-dev-op": "on"}));
        assert_eq!(entries["content-dev-op"], Value::from("symlink"));
    }

    #[test]
    fn invalid_value_without_default_is_absent() {
        for bad in [json!(-1), json!(3), json!(7), json!("foo"), json!(true)] {
            let entries = resolve_json(json!({ "verbosity": bad }));
            assert!(!entries.contains_key("verbosity"));
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let entries = resolve_json(json!({"foo": "bar", "verbosity": 1}));
        assert!(!entries.contains_key("foo"));
        assert_eq!(entries["verbosity"], Value::Integer(1));
    }

    #[test]
    fn theme_folder_forces_move_content_off() {
        let entries = resolve_json(json!({
            "register-theme-folder": true,
            "move-content": true,
        }));
        assert_eq!(entries["move-content"], Value::Bool(false));
        assert_eq!(entries["register-theme-folder"], Value::Bool(true));
    }

    #[test]
    fn move_content_needs_theme_folder_off() {
        let entries = resolve_json(json!({"move-content": "yes"}));
        assert_eq!(entries["move-content"], Value::Bool(false));

        let entries = resolve_json(json!({
            "register-theme-folder": "no",
            "move-content": "yes",
        }));
        assert_eq!(entries["move-content"], Value::Bool(true));
        assert_eq!(entries["register-theme-folder"], Value::Bool(false));
    }

    #[test]
    fn invalid_theme_folder_still_blocks_move_content() {
        let entries = resolve_json(json!({
            "register-theme-folder": "maybe",
            "move-content": true,
        }));
        assert_eq!(entries["register-theme-folder"], Value::Bool(true));
        assert_eq!(entries["move-content"], Value::Bool(false));
    }

    #[test]
    fn theme_folder_and_move_content_never_both_on() {
        let theme_values = [json!(true), json!(false), json!("maybe"), json!(7), json!(null)];
        let move_values = [json!(true), json!("on"), json!(false), json!("nope")];
        for theme in &theme_values {
            for moving in &move_values {
                let entries = resolve_json(json!({
                    "register-theme-folder": theme,
                    "move-content": moving,
                }));
                let both = entries["register-theme-folder"] == Value::Bool(true)
                    && entries["move-content"] == Value::Bool(true);
                assert!(!both, "theme={theme} move={moving}");
            }
        }
        for moving in &move_values {
            let entries = resolve_json(json!({ "move-content": moving }));
            assert_ne!(entries["move-content"], Value::Bool(true), "move={moving}");
        }
    }

    #[test]
    fn dev_op_ask_alias_is_kept() {
        let entries = resolve_json(json!({"content-dev-op": "Prompt"}));
        assert!(entries["content-dev-op"].is_ask());
    }

    #[test]
    fn optional_settings_appear_when_valid() {
        let entries = resolve_json(json!({
            "custom-steps": ["Acme\\BuildStep"],
            "scripts": {"pre-install": "notify"},
            "gitignore-rules": {"vendor": true},
        }));
        assert_eq!(
            entries["custom-steps"],
            Value::List(vec!["Acme\\BuildStep".into()])
        );
        assert!(entries["scripts"].as_table().unwrap().contains_key("pre-install"));
        assert!(entries.contains_key("gitignore-rules"));
    }

    #[test]
    fn empty_step_list_is_omitted() {
        let entries = resolve_json(json!({"custom-steps": ["Acme\\StepInterface"]}));
        assert!(!entries.contains_key("custom-steps"));
    }
}

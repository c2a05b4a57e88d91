#[cfg(test)]
pub mod test {
    use serde_json::json;

    use crate::registry::{StaticRegistry, TypeKind};
    use crate::value::{RawInput, RawValue};

    /// A registry with a handful of step types and script callbacks:
    ///
    /// - `Acme\BuildStep`, `Acme\DeployStep` — concrete steps
    /// - `Acme\BaseStep` — abstract, implements the step contract
    /// - `Acme\StepInterface` — the contract itself
    /// - `Acme\Logger` — concrete, not a step
    /// - `notify`, `cleanup` — callables
    pub fn registry() -> StaticRegistry {
        StaticRegistry::new()
            .with_step("Acme\\BuildStep")
            .with_step("Acme\\DeployStep")
            .with_type("Acme\\BaseStep", TypeKind::Abstract, true)
            .with_type("Acme\\StepInterface", TypeKind::Interface, true)
            .with_type("Acme\\Logger", TypeKind::Concrete, false)
            .with_callable("notify")
            .with_callable("cleanup")
    }

    /// Build a `RawInput` from a `json!` object literal.
    pub fn raw(value: RawValue) -> RawInput {
        match value {
            RawValue::Object(map) => map,
            other => panic!("fixture input must be an object, got: {other}"),
        }
    }

    /// A full, valid input in canonical form, one entry per defaulted setting.
    pub fn canonical_defaults() -> RawInput {
        raw(json!({
            "gitignore": false,
            "env-example": true,
            "env-file": ".env",
            "move-content": false,
            "content-dev-op": "symlink",
            "content-dev-dir": "content-dev",
            "register-theme-folder": true,
            "prevent-overwrite": [".gitignore"],
            "dropins": [],
            "unknown-dropins": "ask",
        }))
    }

    #[test]
    fn canonical_defaults_cover_every_defaulted_setting() {
        use crate::rules::Setting;

        let input = canonical_defaults();
        for setting in Setting::ALL {
            assert_eq!(
                input.contains_key(setting.name()),
                setting.default_value().is_some(),
                "{setting:?}"
            );
        }
    }
}

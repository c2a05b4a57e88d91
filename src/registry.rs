//! Type introspection capability consumed by the `custom-steps` and `scripts`
//! validators.
//!
//! The container does not own any type registry. Whoever owns the installer's
//! steps and callbacks implements [`TypeRegistry`] and hands it to
//! [`ConfigBuilder::registry`](crate::ConfigBuilder::registry).

use std::collections::{HashMap, HashSet};

/// How an identifier's type can be instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Concrete,
    Abstract,
    Interface,
}

/// Answers questions about identifiers found in raw config.
pub trait TypeRegistry {
    /// The kind of type `id` names, or `None` if it names nothing.
    fn kind_of(&self, id: &str) -> Option<TypeKind>;

    /// Whether the type `id` names satisfies the installer step contract.
    fn implements_step(&self, id: &str) -> bool;

    /// Whether `id` names an invocable script callback.
    fn is_callable(&self, id: &str) -> bool;

    /// A usable custom step: concrete and implementing the step contract.
    fn is_step(&self, id: &str) -> bool {
        self.kind_of(id) == Some(TypeKind::Concrete) && self.implements_step(id)
    }
}

/// An in-memory [`TypeRegistry`] populated up front.
///
/// The default instance knows no types and no callbacks, so every custom step
/// and script is filtered out.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    types: HashMap<String, (TypeKind, bool)>,
    callables: HashSet<String>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. `implements_step` states whether it satisfies the
    /// step contract.
    pub fn with_type(mut self, id: &str, kind: TypeKind, implements_step: bool) -> Self {
        self.types.insert(id.to_string(), (kind, implements_step));
        self
    }

    /// Register a concrete type implementing the step contract.
    pub fn with_step(self, id: &str) -> Self {
        self.with_type(id, TypeKind::Concrete, true)
    }

    pub fn with_callable(mut self, id: &str) -> Self {
        self.callables.insert(id.to_string());
        self
    }
}

impl TypeRegistry for StaticRegistry {
    fn kind_of(&self, id: &str) -> Option<TypeKind> {
        self.types.get(id).map(|(kind, _)| *kind)
    }

    fn implements_step(&self, id: &str) -> bool {
        self.types.get(id).is_some_and(|(_, step)| *step)
    }

    fn is_callable(&self, id: &str) -> bool {
        self.callables.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_knows_nothing() {
        let reg = StaticRegistry::new();
        assert_eq!(reg.kind_of("Foo"), None);
        assert!(!reg.is_step("Foo"));
        assert!(!reg.is_callable("foo"));
    }

    #[test]
    fn concrete_step_is_step() {
        let reg = StaticRegistry::new().with_step("App\\CopyStep");
        assert_eq!(reg.kind_of("App\\CopyStep"), Some(TypeKind::Concrete));
        assert!(reg.is_step("App\\CopyStep"));
    }

    #[test]
    fn abstract_and_interface_are_not_steps() {
        let reg = StaticRegistry::new()
            .with_type("BaseStep", TypeKind::Abstract, true)
            .with_type("StepInterface", TypeKind::Interface, true);
        assert!(reg.implements_step("BaseStep"));
        assert!(!reg.is_step("BaseStep"));
        assert!(!reg.is_step("StepInterface"));
    }

    #[test]
    fn concrete_without_contract_is_not_step() {
        let reg = StaticRegistry::new().with_type("Logger", TypeKind::Concrete, false);
        assert!(!reg.is_step("Logger"));
    }

    #[test]
    fn callables_are_tracked_separately() {
        let reg = StaticRegistry::new().with_callable("notify");
        assert!(reg.is_callable("notify"));
        assert!(!reg.is_step("notify"));
    }
}

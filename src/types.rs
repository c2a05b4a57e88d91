/// A config operation, independent of any CLI framework.
/// An orchestration layer converts its own commands into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Every resolved key and value.
    List,
    /// A commented template of the full catalogue.
    Gen,
    Get { key: String },
}

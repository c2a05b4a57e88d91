use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config is immutable: '{key}' cannot be set or removed")]
    Immutable { key: String },

    #[error("Config key '{key}' already exists and cannot be appended again")]
    Frozen { key: String },

    #[error("Unknown key '{key}' needs a validator — use .append_with()")]
    ValidatorRequired { key: String },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to parse TOML input: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("Failed to parse JSON input: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config input must be a table of settings")]
    NotATable,
}

impl ConfigError {
    /// Whether this error signals misuse of the container rather than bad input text.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ConfigError::Immutable { .. }
                | ConfigError::Frozen { .. }
                | ConfigError::ValidatorRequired { .. }
        )
    }
}

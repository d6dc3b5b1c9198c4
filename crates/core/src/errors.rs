use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

#[derive(Error, Debug)]
pub enum PrHelperError {
    #[error("Failed to update pull request. Issue was: '{0}'.")]
    FailedToUpdatePullRequest(String),

    #[error("Git provider error: {0}")]
    GitProviderError(String),
}

/// Errors raised while loading or validating a policy configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported configuration schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

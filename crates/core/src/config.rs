//! Policy configuration for the PR helper.
//!
//! The configuration is a TOML file with a `schemaVersion` and a `policies`
//! table. Every value has a default, so an empty `[policies]` table yields the
//! reference policy. Values are validated when the file is loaded so that the
//! estimator never sees a zero threshold or a negative weight.
//!
//! ```toml
//! schemaVersion = 1
//!
//! [policies.size]
//! maxLines = 500
//! maxReadTimeMinutes = 10
//!
//! [policies.labels]
//! prefix = "size:"
//! ```
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::ConfigLoadError;
use crate::labels::SizeLabelConfig;
use crate::size::{SizePolicy, DEFAULT_PER_FILE_OVERHEAD_MINUTES, DEFAULT_READING_SPEED};
use crate::weights::ComplexityWeights;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// The only configuration schema version understood by this release.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Location of the policy file inside a repository.
pub const REPOSITORY_CONFIG_PATH: &str = ".github/pr-helper.toml";

/// Top-level configuration for the PR helper
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrHelperConfig {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,

    #[serde(default)]
    pub policies: PoliciesConfig,
}

impl Default for PrHelperConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            policies: PoliciesConfig::default(),
        }
    }
}

/// Policies configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PoliciesConfig {
    #[serde(default)]
    pub size: SizePolicyConfig,

    #[serde(default)]
    pub labels: SizeLabelConfig,
}

/// Size thresholds and estimator constants as written in the policy file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SizePolicyConfig {
    pub max_lines: u64,
    pub max_read_time_minutes: u64,

    /// Weighted lines read per minute
    pub reading_speed: f64,
    pub per_file_overhead_minutes: f64,

    /// Per-extension weights added to, or replacing, the built-in table
    pub complexity_weights: BTreeMap<String, f64>,
}

impl Default for SizePolicyConfig {
    fn default() -> Self {
        let policy = SizePolicy::default();
        Self {
            max_lines: policy.max_lines,
            max_read_time_minutes: policy.max_read_time_minutes,
            reading_speed: DEFAULT_READING_SPEED,
            per_file_overhead_minutes: DEFAULT_PER_FILE_OVERHEAD_MINUTES,
            complexity_weights: BTreeMap::new(),
        }
    }
}

fn invalid(field: &str, reason: &str) -> ConfigLoadError {
    ConfigLoadError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

impl PrHelperConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigLoadError> {
        let config: PrHelperConfig = toml::from_str(content)?;
        if config.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(ConfigLoadError::UnsupportedSchemaVersion(
                config.schema_version,
            ));
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks that every policy value is usable by the estimator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let size = &self.policies.size;

        if size.max_lines == 0 {
            return Err(invalid("policies.size.maxLines", "must be greater than zero"));
        }
        if size.max_read_time_minutes == 0 {
            return Err(invalid(
                "policies.size.maxReadTimeMinutes",
                "must be greater than zero",
            ));
        }
        if !(size.reading_speed.is_finite() && size.reading_speed > 0.0) {
            return Err(invalid(
                "policies.size.readingSpeed",
                "must be a positive number",
            ));
        }
        if !(size.per_file_overhead_minutes.is_finite() && size.per_file_overhead_minutes >= 0.0)
        {
            return Err(invalid(
                "policies.size.perFileOverheadMinutes",
                "must be zero or a positive number",
            ));
        }
        for (ext, weight) in &size.complexity_weights {
            if !(weight.is_finite() && *weight >= 0.0) {
                return Err(invalid(
                    &format!("policies.size.complexityWeights.{}", ext),
                    "must be zero or a positive number",
                ));
            }
        }
        if self.policies.labels.prefix.is_empty() {
            return Err(invalid("policies.labels.prefix", "must not be empty"));
        }

        Ok(())
    }

    /// Runtime thresholds for the size estimator.
    pub fn to_size_policy(&self) -> SizePolicy {
        let size = &self.policies.size;
        SizePolicy {
            max_lines: size.max_lines,
            max_read_time_minutes: size.max_read_time_minutes,
            reading_speed_lines_per_minute: size.reading_speed,
            per_file_overhead_minutes: size.per_file_overhead_minutes,
        }
    }

    /// The built-in weight table with the configured overrides applied.
    pub fn complexity_weights(&self) -> ComplexityWeights {
        ComplexityWeights::default().with_overrides(&self.policies.size.complexity_weights)
    }

    pub fn label_config(&self) -> &SizeLabelConfig {
        &self.policies.labels
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// Loads the PR helper configuration from the given path.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// * `Ok(PrHelperConfig)` if loaded and valid
/// * `Err(ConfigLoadError)` if the file is missing, malformed, has an
///   unsupported schema version or holds invalid values
pub fn load_pr_helper_config<P: AsRef<Path>>(path: P) -> Result<PrHelperConfig, ConfigLoadError> {
    let path_ref = path.as_ref();
    let content = match fs::read_to_string(path_ref) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigLoadError::NotFound(path_ref.display().to_string()));
        }
        Err(e) => return Err(ConfigLoadError::Io(e)),
    };
    PrHelperConfig::from_toml_str(&content)
}

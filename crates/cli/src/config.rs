use std::{
    fs,
    path::{Path, PathBuf},
};

use pr_helper_core::config::{load_pr_helper_config, PrHelperConfig};
use pr_helper_core::errors::ConfigLoadError;
use tracing::{debug, info};

use crate::errors::CliError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".pr-helper.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

/// Loads the local policy file.
///
/// An explicitly given path must exist. Without one, the default file in the
/// current directory is used if present and the reference policy otherwise.
pub fn load_local_config(config_path: Option<&str>) -> Result<PrHelperConfig, CliError> {
    let path = get_config_path(config_path);
    debug!("Loading configuration from {:?}", path);

    match load_pr_helper_config(&path) {
        Ok(config) => Ok(config),
        Err(ConfigLoadError::NotFound(_)) if config_path.is_none() => {
            debug!("No configuration file at {:?}. Using defaults.", path);
            Ok(PrHelperConfig::default())
        }
        Err(e) => Err(CliError::ConfigError(format!(
            "Failed to load configuration from {:?}: {}",
            path, e
        ))),
    }
}

/// Save configuration to the specified file
pub fn save_config(config: &PrHelperConfig, path: &Path) -> Result<(), CliError> {
    debug!("Saving configuration to {:?}", path);

    let content = config.to_toml_string().map_err(|e| {
        CliError::ConfigError(format!("Failed to serialize configuration: {}", e))
    })?;

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::IoError(format!("Failed to create directory: {}", e)))?;
    }

    fs::write(path, content).map_err(|e| {
        CliError::IoError(format!("Failed to write configuration file: {}", e))
    })?;

    info!("Configuration saved to {:?}", path);
    Ok(())
}

use clap::Subcommand;
use pr_helper_core::config::PrHelperConfig;
use tracing::debug;

use crate::config::{get_config_path, load_local_config, save_config};
use crate::errors::CliError;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create a policy file with the default values
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check that a policy file parses and holds valid values
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show the effective policy
    Show {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },
}

/// Execute the config command
pub async fn execute(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Init { path, force } => init_config(path.as_deref(), force),
        ConfigCommands::Validate { path } => validate_config(path.as_deref()),
        ConfigCommands::Show { path } => {
            println!("{}", show_config(path.as_deref())?);
            Ok(())
        }
    }
}

/// Initialize a new configuration file
fn init_config(path: Option<&str>, force: bool) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Initializing configuration at {:?}", config_path);

    if config_path.exists() && !force {
        return Err(CliError::ConfigError(format!(
            "Configuration file already exists at {:?}",
            config_path
        )));
    }

    save_config(&PrHelperConfig::default(), &config_path)?;

    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Validate a configuration file
fn validate_config(path: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Validating configuration at {:?}", config_path);

    load_local_config(Some(&config_path.to_string_lossy()))?;

    println!("Configuration is valid");
    Ok(())
}

/// Renders the effective policy as TOML.
///
/// Without a file the defaults are shown.
fn show_config(path: Option<&str>) -> Result<String, CliError> {
    let config = load_local_config(path)?;
    config
        .to_toml_string()
        .map_err(|e| CliError::ConfigError(format!("Failed to serialize configuration: {}", e)))
}

use super::*;
use anyhow::anyhow;
use std::process::{ExitCode, Termination};

#[test]
fn test_config_error_display() {
    let err = CliError::ConfigError("bad config".to_string());
    assert_eq!(format!("{}", err), "Configuration error: bad config");
}

#[test]
fn test_auth_error_display() {
    let err = CliError::AuthError("bad auth".to_string());
    assert_eq!(format!("{}", err), "Authentication error: bad auth");
}

#[test]
fn test_network_error_display() {
    let err = CliError::NetworkError("net fail".to_string());
    assert_eq!(format!("{}", err), "Network error: net fail");
}

#[test]
fn test_invalid_arguments_display() {
    let err = CliError::InvalidArguments("bad arg".to_string());
    assert_eq!(format!("{}", err), "Invalid arguments: bad arg");
}

#[test]
fn test_io_error_display() {
    let err = CliError::IoError("disk full".to_string());
    assert_eq!(format!("{}", err), "I/O error: disk full");
}

#[test]
fn test_other_error_display() {
    let err = CliError::Other("other".to_string());
    assert_eq!(format!("{}", err), "Error: other");
}

#[test]
fn test_from_anyhow_error() {
    let err: CliError = anyhow!("anyhow error").into();
    assert!(matches!(err, CliError::Other(_)));
}

#[test]
fn test_from_config_load_error() {
    let err: CliError = ConfigLoadError::UnsupportedSchemaVersion(9).into();

    assert!(matches!(err, CliError::ConfigError(_)));
    assert!(err.to_string().contains("Unsupported configuration schema version: 9"));
}

#[test]
fn test_from_pr_helper_error() {
    let provider: CliError = PrHelperError::GitProviderError("gone".to_string()).into();
    let update: CliError = PrHelperError::FailedToUpdatePullRequest("label".to_string()).into();

    assert!(matches!(provider, CliError::NetworkError(_)));
    assert!(matches!(update, CliError::NetworkError(_)));
}

#[test]
fn test_exit_codes() {
    assert_eq!(CliError::ConfigError(String::new()).report(), ExitCode::from(2));
    assert_eq!(CliError::AuthError(String::new()).report(), ExitCode::from(3));
    assert_eq!(CliError::NetworkError(String::new()).report(), ExitCode::from(4));
    assert_eq!(CliError::InvalidArguments(String::new()).report(), ExitCode::from(5));
    assert_eq!(CliError::IoError(String::new()).report(), ExitCode::from(6));
    assert_eq!(CliError::Other(String::new()).report(), ExitCode::FAILURE);
}

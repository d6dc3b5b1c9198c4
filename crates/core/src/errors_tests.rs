use super::*;

#[test]
fn test_pr_helper_error_messages() {
    assert_eq!(
        PrHelperError::FailedToUpdatePullRequest("Failed to add size label".to_string())
            .to_string(),
        "Failed to update pull request. Issue was: 'Failed to add size label'."
    );
    assert_eq!(
        PrHelperError::GitProviderError("not found".to_string()).to_string(),
        "Git provider error: not found"
    );
}

#[test]
fn test_config_load_error_messages() {
    assert_eq!(
        ConfigLoadError::NotFound(".pr-helper.toml".to_string()).to_string(),
        "Configuration file not found: .pr-helper.toml"
    );
    assert_eq!(
        ConfigLoadError::UnsupportedSchemaVersion(3).to_string(),
        "Unsupported configuration schema version: 3"
    );
    assert_eq!(
        ConfigLoadError::InvalidValue {
            field: "policies.size.maxLines".to_string(),
            reason: "must be greater than zero".to_string(),
        }
        .to_string(),
        "Invalid configuration value for 'policies.size.maxLines': must be greater than zero"
    );
}

#[test]
fn test_config_load_error_from_toml() {
    let parse_error = toml::from_str::<toml::Table>("not = [valid").unwrap_err();

    let error: ConfigLoadError = parse_error.into();

    assert!(matches!(error, ConfigLoadError::Toml(_)));
    assert!(error
        .to_string()
        .starts_with("Failed to parse configuration file:"));
}

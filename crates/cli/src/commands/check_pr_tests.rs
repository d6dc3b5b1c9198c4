use super::*;
use async_trait::async_trait;
use pr_helper_developer_platforms::errors::Error;
use std::sync::Mutex;
use tempfile::tempdir;

/// Config fetcher returning a canned response
struct StaticFetcher {
    response: fn() -> Result<Option<String>, Error>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    fn new(response: fn() -> Result<Option<String>, Error>) -> Self {
        Self {
            response,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConfigFetcher for StaticFetcher {
    async fn fetch_config(
        &self,
        repo_owner: &str,
        repo_name: &str,
        path: &str,
    ) -> Result<Option<String>, Error> {
        self.requested
            .lock()
            .unwrap()
            .push(format!("{}/{}:{}", repo_owner, repo_name, path));
        (self.response)()
    }
}

#[test]
fn test_parse_repository() {
    assert_eq!(parse_repository("octo/widgets").unwrap(), ("octo", "widgets"));
}

#[test]
fn test_parse_repository_rejects_malformed_input() {
    for repo in ["widgets", "/widgets", "octo/", "octo/widgets/extra", ""] {
        assert!(
            matches!(parse_repository(repo), Err(CliError::InvalidArguments(_))),
            "'{}' should be rejected",
            repo
        );
    }
}

#[test]
fn test_debug_output_hides_token() {
    let args = CheckPrArgs {
        repo: "octo/widgets".to_string(),
        pr: 3,
        token: Some("ghp_secret".to_string()),
        config: None,
        dry_run: true,
    };

    let debug = format!("{:?}", args);

    assert!(!debug.contains("ghp_secret"));
    assert!(debug.contains("<redacted>"));
}

#[tokio::test]
async fn test_resolve_config_uses_repository_file() {
    let fetcher = StaticFetcher::new(|| {
        Ok(Some(
            "schemaVersion = 1\n[policies.size]\nmaxLines = 200\n".to_string(),
        ))
    });

    let config = resolve_config(&fetcher, "octo", "widgets", None)
        .await
        .unwrap();

    assert_eq!(config.policies.size.max_lines, 200);
    assert_eq!(
        *fetcher.requested.lock().unwrap(),
        vec!["octo/widgets:.github/pr-helper.toml".to_string()]
    );
}

#[tokio::test]
async fn test_resolve_config_falls_back_when_repository_file_is_missing() {
    let fetcher = StaticFetcher::new(|| Ok(None));

    let config = resolve_config(&fetcher, "octo", "widgets", None)
        .await
        .unwrap();

    assert_eq!(config, PrHelperConfig::default());
}

#[tokio::test]
async fn test_resolve_config_falls_back_when_repository_file_is_invalid() {
    let fetcher = StaticFetcher::new(|| Ok(Some("schemaVersion = 7".to_string())));

    let config = resolve_config(&fetcher, "octo", "widgets", None)
        .await
        .unwrap();

    assert_eq!(config, PrHelperConfig::default());
}

#[tokio::test]
async fn test_resolve_config_falls_back_when_fetch_fails() {
    let fetcher = StaticFetcher::new(|| Err(Error::RateLimitExceeded));

    let config = resolve_config(&fetcher, "octo", "widgets", None)
        .await
        .unwrap();

    assert_eq!(config, PrHelperConfig::default());
}

#[tokio::test]
async fn test_resolve_config_prefers_explicit_local_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pr-helper.toml");
    std::fs::write(&path, "schemaVersion = 1\n[policies.size]\nmaxLines = 42\n").unwrap();
    let fetcher = StaticFetcher::new(|| Ok(None));

    let config = resolve_config(&fetcher, "octo", "widgets", path.to_str())
        .await
        .unwrap();

    assert_eq!(config.policies.size.max_lines, 42);
    assert!(fetcher.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_without_token_is_an_auth_error() {
    let args = CheckPrArgs {
        repo: "octo/widgets".to_string(),
        pr: 1,
        token: None,
        config: None,
        dry_run: true,
    };

    let result = execute(args).await;

    assert!(matches!(result, Err(CliError::AuthError(_))));
}

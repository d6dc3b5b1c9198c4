use clap::Args;
use pr_helper_core::config::{PrHelperConfig, REPOSITORY_CONFIG_PATH};
use pr_helper_core::PrHelper;
use pr_helper_developer_platforms::github::{create_token_client, GitHubProvider};
use pr_helper_developer_platforms::ConfigFetcher;
use tracing::{debug, error, info, instrument, warn};

use crate::config::load_local_config;
use crate::errors::CliError;

#[cfg(test)]
#[path = "check_pr_tests.rs"]
mod tests;

/// Arguments for the check-pr command
#[derive(Args)]
pub struct CheckPrArgs {
    /// Repository in `owner/name` form
    #[arg(short, long)]
    pub repo: String,

    /// Pull request number
    #[arg(short, long)]
    pub pr: u64,

    /// GitHub token with access to the repository
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Alternate config file. Overrides the repository policy file.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only estimate. Leave labels and comments untouched.
    #[arg(long)]
    pub dry_run: bool,
}

impl std::fmt::Debug for CheckPrArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckPrArgs")
            .field("repo", &self.repo)
            .field("pr", &self.pr)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("config", &self.config)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

/// Splits `owner/name` into its two parts.
pub fn parse_repository(repo: &str) -> Result<(&str, &str), CliError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(CliError::InvalidArguments(format!(
            "Expected the repository as 'owner/name', got '{}'",
            repo
        ))),
    }
}

/// Determines the policy for a repository.
///
/// An explicit local file wins. Otherwise the repository's own policy file is
/// used, and when it is missing or unusable the local default file or the
/// reference policy.
#[instrument(skip(fetcher))]
pub async fn resolve_config<F: ConfigFetcher>(
    fetcher: &F,
    repo_owner: &str,
    repo_name: &str,
    local_path: Option<&str>,
) -> Result<PrHelperConfig, CliError> {
    if local_path.is_some() {
        return load_local_config(local_path);
    }

    match fetcher
        .fetch_config(repo_owner, repo_name, REPOSITORY_CONFIG_PATH)
        .await
    {
        Ok(Some(content)) => match PrHelperConfig::from_toml_str(&content) {
            Ok(config) => {
                info!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    "Loaded pr-helper config from {}",
                    REPOSITORY_CONFIG_PATH
                );
                return Ok(config);
            }
            Err(e) => warn!(
                repository_owner = repo_owner,
                repository = repo_name,
                "Failed to load pr-helper config from {}: {}. Falling back to defaults.",
                REPOSITORY_CONFIG_PATH,
                e
            ),
        },
        Ok(None) => debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            "No {} in the repository",
            REPOSITORY_CONFIG_PATH
        ),
        Err(e) => warn!(
            repository_owner = repo_owner,
            repository = repo_name,
            error = e.to_string(),
            "Failed to fetch {}. Falling back to defaults.",
            REPOSITORY_CONFIG_PATH
        ),
    }

    load_local_config(None)
}

/// Executes the `check-pr` command.
///
/// Estimates the size of the pull request and, unless `--dry-run` is given,
/// updates its size label and size comment. The result is printed as JSON.
///
/// # Errors
///
/// - `CliError::InvalidArguments` if the repository is not `owner/name`
/// - `CliError::AuthError` if no token is available or the client cannot be built
/// - `CliError::ConfigError` if an explicit configuration file cannot be loaded
/// - `CliError::NetworkError` if GitHub cannot be read or updated
#[instrument]
pub async fn execute(args: CheckPrArgs) -> Result<(), CliError> {
    let (repo_owner, repo_name) = parse_repository(&args.repo)?;

    let token = args.token.as_deref().ok_or_else(|| {
        CliError::AuthError(
            "No GitHub token given. Pass --token or set GITHUB_TOKEN.".to_string(),
        )
    })?;
    let client = create_token_client(token).map_err(|e| CliError::AuthError(e.to_string()))?;
    let provider = GitHubProvider::new(client);

    let config = resolve_config(&provider, repo_owner, repo_name, args.config.as_deref()).await?;
    let helper = PrHelper::with_config(provider, config);

    let json = if args.dry_run {
        let estimate = helper
            .estimate_pull_request(repo_owner, repo_name, args.pr)
            .await?;
        serde_json::to_string_pretty(&estimate)
    } else {
        let result = helper
            .process_pull_request(repo_owner, repo_name, args.pr)
            .await
            .inspect_err(|e| {
                error!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = args.pr,
                    error = e.to_string(),
                    "Failed to process pull request"
                );
            })?;
        serde_json::to_string_pretty(&result)
    }
    .map_err(|e| CliError::Other(format!("Failed to serialize the result: {}", e)))?;

    println!("{}", json);
    Ok(())
}

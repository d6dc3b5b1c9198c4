//! # PR Helper Core
//!
//! Review-effort estimation and size labeling for pull requests.
//!
//! The crate is built from small pure pieces and one orchestrator:
//! - [`weights`]: reading-difficulty multipliers per file type
//! - [`size`]: the size estimator and the recommendation classifier
//! - [`labels`]: size-label reconciliation against the labels on a PR
//! - [`splits`]: review ordering for PRs that were split up
//! - [`comments`]: markdown rendering of the bot comments
//! - [`config`]: the TOML policy file
//! - [`PrHelper`]: fetches a PR, estimates it and updates labels and comments
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pr_helper_developer_platforms::PullRequestProvider;
//! use pr_helper_core::{PrHelper, config::PrHelperConfig};
//!
//! async fn check_pr<P: PullRequestProvider + std::fmt::Debug>(
//!     provider: P,
//! ) -> Result<(), pr_helper_core::errors::PrHelperError> {
//!     let config = PrHelperConfig::from_toml_str("schemaVersion = 1").unwrap();
//!     let helper = PrHelper::with_config(provider, config);
//!
//!     let result = helper.process_pull_request("owner", "repo", 123).await?;
//!
//!     println!(
//!         "{} lines, recommendation: {}",
//!         result.estimate.total_lines, result.estimate.recommendation
//!     );
//!     Ok(())
//! }
//! ```

use pr_helper_developer_platforms::PullRequestProvider;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

pub mod comments;
use comments::{format_size_comment, SIZE_COMMENT_MARKER};

pub mod config;
use config::PrHelperConfig;

pub mod errors;
use errors::PrHelperError;

pub mod labels;
pub mod size;
use size::{estimate_size, Recommendation, SizeEstimate};

pub mod splits;
pub mod weights;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Result of running the size check on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeCheckResult {
    pub estimate: SizeEstimate,

    /// The size label now on the PR, or `None` when size labels are disabled
    pub size_label: Option<String>,
}

/// Runs the size check against pull requests hosted on a developer platform.
///
/// The helper keeps no state between runs. Every run reads the current labels
/// and comments from the PR and converges them on the current estimate.
#[derive(Debug)]
pub struct PrHelper<P: PullRequestProvider + std::fmt::Debug> {
    provider: P,
    config: PrHelperConfig,
}

impl<P: PullRequestProvider + std::fmt::Debug> PrHelper<P> {
    /// Creates a new `PrHelper` with the reference policy.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: PrHelperConfig::default(),
        }
    }

    /// Creates a new `PrHelper` with a custom configuration.
    pub fn with_config(provider: P, config: PrHelperConfig) -> Self {
        Self { provider, config }
    }

    /// Fetches a pull request and its files and estimates its size.
    ///
    /// Nothing on the pull request is changed.
    ///
    /// # Errors
    ///
    /// Returns [`PrHelperError::GitProviderError`] when the PR or its files
    /// cannot be fetched.
    #[instrument]
    pub async fn estimate_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<SizeEstimate, PrHelperError> {
        let pr = self
            .provider
            .get_pull_request(repo_owner, repo_name, pr_number)
            .await
            .map_err(|e| {
                error!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    error = e.to_string(),
                    "Failed to find the PR"
                );
                PrHelperError::GitProviderError(format!(
                    "Failed to find the PR with number [{}] in {}/{}",
                    pr_number, repo_owner, repo_name
                ))
            })?;

        let files = self
            .provider
            .get_pull_request_files(repo_owner, repo_name, pr_number)
            .await
            .map_err(|e| {
                error!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    error = e.to_string(),
                    "Failed to list the files of the PR"
                );
                PrHelperError::GitProviderError(format!(
                    "Failed to list the files of PR [{}] in {}/{}",
                    pr_number, repo_owner, repo_name
                ))
            })?;

        if files.len() as u64 != pr.changed_files {
            debug!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                listed = files.len(),
                reported = pr.changed_files,
                "File list does not cover every changed file"
            );
        }

        let estimate = estimate_size(
            &files,
            pr.additions,
            pr.deletions,
            &self.config.to_size_policy(),
            &self.config.complexity_weights(),
        );

        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            total_lines = estimate.total_lines,
            read_time_minutes = estimate.estimated_read_time_minutes,
            complexity = estimate.cognitive_complexity.as_str(),
            recommendation = estimate.recommendation.as_str(),
            "Estimated pull request size"
        );

        Ok(estimate)
    }

    /// Posts, updates or removes the size-check comment.
    ///
    /// Oversized PRs get the comment, updated in place on later runs. Once a PR
    /// is back within the limits any earlier size-check comment is deleted.
    #[instrument]
    async fn communicate_size_status(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        estimate: &SizeEstimate,
    ) -> Result<(), PrHelperError> {
        if estimate.recommendation != Recommendation::Ok {
            let comment = format_size_comment(estimate, pr_number);
            let updated = self
                .provider
                .upsert_comment(repo_owner, repo_name, pr_number, SIZE_COMMENT_MARKER, &comment)
                .await
                .map_err(|e| {
                    warn!(
                        repository_owner = repo_owner,
                        repository = repo_name,
                        pull_request = pr_number,
                        error = e.to_string(),
                        "Failed to write the size comment"
                    );
                    PrHelperError::FailedToUpdatePullRequest(
                        "Failed to add size comment".to_string(),
                    )
                })?;

            info!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                updated = updated,
                "Posted size comment"
            );
            return Ok(());
        }

        let comments = self
            .provider
            .list_comments(repo_owner, repo_name, pr_number)
            .await
            .map_err(|_| {
                PrHelperError::FailedToUpdatePullRequest("Failed to list comments".to_string())
            })?;

        for comment in comments
            .iter()
            .filter(|c| c.body.contains(SIZE_COMMENT_MARKER))
        {
            self.provider
                .delete_comment(repo_owner, repo_name, comment.id)
                .await
                .map_err(|_| {
                    PrHelperError::FailedToUpdatePullRequest(
                        "Failed to delete size comment".to_string(),
                    )
                })?;

            info!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                comment_id = comment.id,
                "Removed stale size comment"
            );
        }

        Ok(())
    }

    /// Runs the size check on a pull request.
    ///
    /// This method:
    /// 1. Fetches the PR and its changed files
    /// 2. Estimates the review effort
    /// 3. Applies the matching size label (if enabled)
    /// 4. Posts or updates the size comment for oversized PRs and removes it
    ///    from PRs that are within the limits
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    ///
    /// # Returns
    ///
    /// The estimate and the applied size label
    ///
    /// # Errors
    ///
    /// Returns an error if the PR cannot be fetched or the size label or
    /// comment cannot be written.
    #[instrument]
    pub async fn process_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<SizeCheckResult, PrHelperError> {
        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            "Processing pull request",
        );

        let estimate = self
            .estimate_pull_request(repo_owner, repo_name, pr_number)
            .await?;

        let label_config = self.config.label_config();
        let size_label = if label_config.enabled {
            let label = labels::sync_size_label(
                &self.provider,
                repo_owner,
                repo_name,
                pr_number,
                estimate.total_lines,
                label_config,
            )
            .await
            .inspect_err(|e| {
                error!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    error = e.to_string(),
                    "Failed to update the size label of the PR."
                )
            })?;
            Some(label)
        } else {
            debug!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                "Size labels are disabled",
            );
            None
        };

        self.communicate_size_status(repo_owner, repo_name, pr_number, &estimate)
            .await
            .inspect_err(|e| {
                error!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    error = e.to_string(),
                    "Failed to update the size comment of the PR."
                )
            })?;

        Ok(SizeCheckResult {
            estimate,
            size_label,
        })
    }
}

use async_trait::async_trait;
use base64::Engine;
use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    errors::Error,
    models::{Comment, Label, PullRequest, PullRequestFile},
    ConfigFetcher, PullRequestProvider,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - A GitHub token with read access to pull requests and write access
///   to issues (labels and comments).
///
/// # Errors
///
/// Returns `Error::AuthError` if the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use pr_helper_developer_platforms::github::{create_token_client, GitHubProvider};
///
/// let client = create_token_client("ghp_example").unwrap();
/// let provider = GitHubProvider::new(client);
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            Error::AuthError(format!(
                "Failed to create a GitHub client from the token. Error was: {}",
                e
            ))
        })
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = *source;
            error!(
                error_message = err.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}

/// `PullRequestProvider` and `ConfigFetcher` backed by the GitHub REST API.
#[derive(Debug, Default)]
pub struct GitHubProvider {
    client: Octocrab,
}

impl GitHubProvider {
    pub async fn fetch_default_branch(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<String, Error> {
        let repo = match self.client.repos(repo_owner, repo_name).get().await {
            Ok(r) => r,
            Err(e) => {
                log_octocrab_error("Failed to get repository information", e);
                return Err(Error::InvalidResponse);
            }
        };
        let branch = repo.default_branch.unwrap_or("main".to_string());

        Ok(branch)
    }

    /// Fetch the content of a file from the repository at the given path.
    /// Returns Ok(Some(content)) if found, Ok(None) if not found, or Err on error.
    pub async fn fetch_file_content(
        &self,
        repo_owner: &str,
        repo_name: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<Option<String>, Error> {
        let content_result = self
            .client
            .repos(repo_owner, repo_name)
            .get_content()
            .path(path)
            .r#ref(reference.unwrap_or("main"))
            .send()
            .await;

        match content_result {
            Ok(response) => {
                let Some(file) = response.items.into_iter().next() else {
                    return Ok(None);
                };
                let Some(content) = file.content else {
                    return Ok(None);
                };

                // Content is base64 encoded and wrapped at 60 characters
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(content.replace('\n', ""))
                    .map_err(|_| Error::InvalidResponse)?;
                let content_str = String::from_utf8(decoded).map_err(|_| Error::InvalidResponse)?;
                Ok(Some(content_str))
            }
            Err(e) => {
                if e.to_string().contains("404") {
                    debug!(
                        repository_owner = repo_owner,
                        repository = repo_name,
                        path = path,
                        "File not found in repository"
                    );
                    Ok(None)
                } else {
                    log_octocrab_error("Failed to fetch file content", e);
                    Err(Error::ApiError())
                }
            }
        }
    }

    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Follows the `next` links from `current_page` and returns every item.
    ///
    /// A failed page fails the whole listing. Callers rely on complete lists.
    async fn collect_pages<T: DeserializeOwned>(
        &self,
        mut current_page: Page<T>,
        message: &str,
    ) -> Result<Vec<T>, Error> {
        let mut items = current_page.take_items();
        loop {
            match self.client.get_page::<T>(&current_page.next).await {
                Ok(Some(mut new_page)) => {
                    items.extend(new_page.take_items());
                    current_page = new_page;
                }
                Ok(None) => return Ok(items),
                Err(e) => {
                    log_octocrab_error(message, e);
                    return Err(Error::InvalidResponse);
                }
            }
        }
    }
}

#[async_trait]
impl ConfigFetcher for GitHubProvider {
    #[instrument]
    async fn fetch_config(
        &self,
        repo_owner: &str,
        repo_name: &str,
        path: &str,
    ) -> Result<Option<String>, Error> {
        let default_branch_name = self.fetch_default_branch(repo_owner, repo_name).await?;
        self.fetch_file_content(repo_owner, repo_name, path, Some(&default_branch_name))
            .await
    }
}

#[async_trait]
impl PullRequestProvider for GitHubProvider {
    #[instrument]
    async fn get_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<PullRequest, Error> {
        match self
            .client
            .pulls(repo_owner, repo_name)
            .get(pr_number)
            .await
        {
            Ok(pr) => Ok(PullRequest {
                number: pr.number,
                title: pr.title.unwrap_or_default(),
                body: pr.body,
                draft: pr.draft.unwrap_or_default(),
                additions: pr.additions.unwrap_or_default(),
                deletions: pr.deletions.unwrap_or_default(),
                changed_files: pr.changed_files.unwrap_or_default(),
            }),
            Err(e) => {
                log_octocrab_error("Failed to get pull request information", e);
                Err(Error::InvalidResponse)
            }
        }
    }

    #[instrument]
    async fn get_pull_request_files(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<PullRequestFile>, Error> {
        let current_page = match self
            .client
            .pulls(repo_owner, repo_name)
            .list_files(pr_number)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                log_octocrab_error("Failed to list files for pull request", e);
                return Err(Error::InvalidResponse);
            }
        };

        let entries = self
            .collect_pages(current_page, "Failed to list files for pull request")
            .await?;

        let result: Vec<PullRequestFile> = entries
            .into_iter()
            .map(|entry| PullRequestFile {
                filename: entry.filename,
                status: format!("{:?}", entry.status).to_lowercase(),
                additions: entry.additions,
                deletions: entry.deletions,
                changes: entry.changes,
                patch: entry.patch,
                previous_filename: entry.previous_filename,
            })
            .collect();

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            count = result.len(),
            "Retrieved changed files",
        );

        Ok(result)
    }

    #[instrument(skip(comment))]
    async fn add_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        comment: &str,
    ) -> Result<(), Error> {
        match self
            .client
            .issues(repo_owner, repo_name)
            .create_comment(pr_number, comment)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                log_octocrab_error("Failed to add pull request comment", e);
                Err(Error::FailedToUpdatePullRequest(
                    "Failed to add comment".to_string(),
                ))
            }
        }
    }

    #[instrument(skip(comment))]
    async fn update_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        comment_id: u64,
        comment: &str,
    ) -> Result<(), Error> {
        match self
            .client
            .issues(repo_owner, repo_name)
            .update_comment(comment_id.into(), comment)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                log_octocrab_error("Failed to update pull request comment", e);
                Err(Error::FailedToUpdatePullRequest(
                    "Failed to update comment".to_string(),
                ))
            }
        }
    }

    #[instrument]
    async fn delete_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        comment_id: u64,
    ) -> Result<(), Error> {
        self.client
            .issues(repo_owner, repo_name)
            .delete_comment(comment_id.into())
            .await
            .map_err(|e| {
                warn!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    comment = comment_id,
                    "Failed to delete pr comment",
                );
                Error::FailedToUpdatePullRequest(format!("Failed to delete comment: {}", e))
            })
    }

    #[instrument]
    async fn list_comments(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<Comment>, Error> {
        let current_page = match self
            .client
            .issues(repo_owner, repo_name)
            .list_comments(pr_number)
            .send()
            .await
        {
            Ok(p) => p,
            Err(e) => {
                log_octocrab_error("Failed to list comments for pull request", e);
                return Err(Error::InvalidResponse);
            }
        };

        let comments = self
            .collect_pages(current_page, "Failed to list comments for pull request")
            .await?;

        let result = comments
            .into_iter()
            .map(|c| Comment {
                id: c.id.into_inner(),
                body: c.body.unwrap_or_default(),
            })
            .collect();

        Ok(result)
    }

    #[instrument]
    async fn add_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        match self
            .client
            .issues(repo_owner, repo_name)
            .add_labels(pr_number, labels)
            .await
        {
            Ok(_) => {
                info!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    labels = ?labels,
                    "Added labels",
                );
                Ok(())
            }
            Err(e) => {
                log_octocrab_error("Failed to add new labels", e);
                Err(Error::FailedToUpdatePullRequest(
                    "Failed to add labels".to_string(),
                ))
            }
        }
    }

    #[instrument]
    async fn remove_label(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        label: &str,
    ) -> Result<(), Error> {
        match self
            .client
            .issues(repo_owner, repo_name)
            .remove_label(pr_number, label)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                // A missing label is the common case, so keep this below error level
                debug!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    label = label,
                    error_message = e.to_string(),
                    "Failed to remove label",
                );
                Err(Error::FailedToUpdatePullRequest(
                    "Failed to remove label".to_string(),
                ))
            }
        }
    }

    #[instrument]
    async fn list_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<Label>, Error> {
        let current_page = match self
            .client
            .issues(repo_owner, repo_name)
            .list_labels_for_issue(pr_number)
            .send()
            .await
        {
            Ok(p) => p,
            Err(e) => {
                log_octocrab_error("Failed to list all labels for pull request", e);
                return Err(Error::InvalidResponse);
            }
        };

        let labels = self
            .collect_pages(current_page, "Failed to list all labels for pull request")
            .await?;

        let result = labels.into_iter().map(|l| Label { name: l.name }).collect();

        Ok(result)
    }
}

use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::{Comment, Label, PullRequest, PullRequestFile};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Trait to fetch configuration files from remote repositories.
#[async_trait]
pub trait ConfigFetcher: Sync + Send {
    /// Fetch the content of a configuration file at the given path.
    /// Returns Ok(Some(content)) if found, Ok(None) if not found, or Err on error.
    async fn fetch_config(
        &self,
        repo_owner: &str,
        repo_name: &str,
        path: &str,
    ) -> Result<Option<String>, Error>;
}

/// Trait for interacting with developer platforms that host pull requests (e.g., GitHub).
///
/// Implementations provide read access to pull requests and their changed files,
/// and write access to labels and comments. The PR helper never keeps state of
/// its own; labels and comments on the pull request are the system of record.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use pr_helper_developer_platforms::{PullRequestProvider, errors::Error};
/// use pr_helper_developer_platforms::models::{Comment, Label, PullRequest, PullRequestFile};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyProvider;
///
/// #[async_trait]
/// impl PullRequestProvider for MyProvider {
///     async fn get_pull_request(
///         &self,
///         repo_owner: &str,
///         repo_name: &str,
///         pr_number: u64,
///     ) -> Result<PullRequest, Error> {
///         // Fetch the pull request from the platform API
///         # unimplemented!()
///     }
///
///     // Implement other required methods...
///     # async fn get_pull_request_files(&self, _: &str, _: &str, _: u64) -> Result<Vec<PullRequestFile>, Error> { unimplemented!() }
///     # async fn add_comment(&self, _: &str, _: &str, _: u64, _: &str) -> Result<(), Error> { unimplemented!() }
///     # async fn update_comment(&self, _: &str, _: &str, _: u64, _: &str) -> Result<(), Error> { unimplemented!() }
///     # async fn delete_comment(&self, _: &str, _: &str, _: u64) -> Result<(), Error> { unimplemented!() }
///     # async fn list_comments(&self, _: &str, _: &str, _: u64) -> Result<Vec<Comment>, Error> { unimplemented!() }
///     # async fn add_labels(&self, _: &str, _: &str, _: u64, _: &[String]) -> Result<(), Error> { unimplemented!() }
///     # async fn remove_label(&self, _: &str, _: &str, _: u64, _: &str) -> Result<(), Error> { unimplemented!() }
///     # async fn list_labels(&self, _: &str, _: &str, _: u64) -> Result<Vec<Label>, Error> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait PullRequestProvider: Send + Sync {
    /// Retrieves a pull request, including its PR-level line totals.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    async fn get_pull_request(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<PullRequest, Error>;

    /// Gets the complete list of files changed in a pull request.
    ///
    /// Implementations are responsible for pagination; callers receive a fully
    /// materialized list.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    async fn get_pull_request_files(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<PullRequestFile>, Error>;

    /// Adds a comment to a pull request.
    async fn add_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        comment: &str,
    ) -> Result<(), Error>;

    /// Replaces the body of an existing comment.
    async fn update_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        comment_id: u64,
        comment: &str,
    ) -> Result<(), Error>;

    /// Deletes a comment from a pull request.
    async fn delete_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        comment_id: u64,
    ) -> Result<(), Error>;

    /// Lists all comments on a pull request.
    async fn list_comments(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<Comment>, Error>;

    /// Adds labels to a pull request.
    async fn add_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        labels: &[String],
    ) -> Result<(), Error>;

    /// Removes a label from a pull request.
    ///
    /// Removing a label that is not applied is reported as an error by most
    /// platforms. Callers that only want the label gone should ignore that error.
    async fn remove_label(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        label: &str,
    ) -> Result<(), Error>;

    /// Lists all labels applied to a pull request.
    async fn list_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
    ) -> Result<Vec<Label>, Error>;

    /// Updates the first comment containing `marker`, or adds a new comment when
    /// none exists.
    ///
    /// The marker is expected to be part of `comment` so that the next run finds
    /// the same comment again.
    ///
    /// # Returns
    ///
    /// `true` when an existing comment was updated, `false` when a new one was added.
    async fn upsert_comment(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        marker: &str,
        comment: &str,
    ) -> Result<bool, Error> {
        let comments = self.list_comments(repo_owner, repo_name, pr_number).await?;
        match comments.iter().find(|c| c.body.contains(marker)) {
            Some(existing) => {
                self.update_comment(repo_owner, repo_name, existing.id, comment)
                    .await?;
                Ok(true)
            }
            None => {
                self.add_comment(repo_owner, repo_name, pr_number, comment)
                    .await?;
                Ok(false)
            }
        }
    }
}

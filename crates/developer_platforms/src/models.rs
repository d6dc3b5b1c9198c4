//! # Models
//!
//! This module contains the data models exchanged with developer platforms.
//!
//! These models represent the entities the PR helper reads and writes: pull
//! requests, the files they change, comments and labels. They are serializable
//! so that they can be loaded from JSON snapshots as well as platform APIs.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a comment on a pull request.
///
/// # Examples
///
/// ```
/// use pr_helper_developer_platforms::models::Comment;
///
/// let comment = Comment {
///     id: 456,
///     body: "<!-- PR_SIZE_CHECK -->\n## PR Size Check".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The unique identifier of the comment
    pub id: u64,

    /// The text content of the comment
    pub body: String,
}

/// Represents a label on a pull request.
///
/// # Examples
///
/// ```
/// use pr_helper_developer_platforms::models::Label;
///
/// let label = Label {
///     name: "size:m".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

/// Represents a pull request from a Git provider.
///
/// Only the fields needed for size estimation and labeling are kept. The line
/// counts are the totals reported by the platform for the whole pull request and
/// may differ from the sum over a filtered or truncated file list.
///
/// # Examples
///
/// ```
/// use pr_helper_developer_platforms::models::PullRequest;
///
/// let pr = PullRequest {
///     number: 123,
///     title: "feat(cache): add a read-through cache".to_string(),
///     body: None,
///     draft: true,
///     additions: 120,
///     deletions: 30,
///     changed_files: 4,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request number
    pub number: u64,

    /// The title of the pull request
    pub title: String,

    /// The description/body of the pull request, if any
    #[serde(default)]
    pub body: Option<String>,

    /// Whether the pull request is still a draft
    #[serde(default)]
    pub draft: bool,

    /// Lines added across the whole pull request
    #[serde(default)]
    pub additions: u64,

    /// Lines deleted across the whole pull request
    #[serde(default)]
    pub deletions: u64,

    /// Number of files the platform reports as changed
    #[serde(default)]
    pub changed_files: u64,
}

/// Represents a single file changed by a pull request.
///
/// `changes` is taken as reported by the platform. It is normally
/// `additions + deletions` but consumers must not recompute it.
///
/// # Examples
///
/// ```
/// use pr_helper_developer_platforms::models::PullRequestFile;
///
/// let file = PullRequestFile {
///     filename: "src/lib.rs".to_string(),
///     status: "modified".to_string(),
///     additions: 10,
///     deletions: 5,
///     changes: 15,
///     patch: None,
///     previous_filename: None,
/// };
/// assert_eq!(file.changes, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Path of the file relative to the repository root
    pub filename: String,

    /// Change status reported by the platform (added, modified, removed, renamed, ...)
    #[serde(default)]
    pub status: String,

    /// Lines added to the file
    #[serde(default)]
    pub additions: u64,

    /// Lines removed from the file
    #[serde(default)]
    pub deletions: u64,

    /// Total changed lines as reported by the platform
    #[serde(default)]
    pub changes: u64,

    /// Unified diff for the file, when the platform includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,

    /// Previous path of a renamed file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_filename: Option<String>,
}

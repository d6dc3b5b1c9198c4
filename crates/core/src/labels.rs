//! # Size Labels
//!
//! Keeps exactly one size label on a pull request.
//!
//! Reconciliation is split in two steps. [`reconcile_size_label`] is a pure
//! function that compares the labels currently on the PR with the label the
//! line count calls for and returns a [`LabelDiff`]. [`sync_size_label`] applies
//! that diff through a [`PullRequestProvider`].
//!
//! The diff is always recomputed from the labels observed on the PR, so
//! repeated or concurrent runs converge on a single correct size label no matter
//! how many size labels were present before.

use std::collections::BTreeSet;

use pr_helper_developer_platforms::PullRequestProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::errors::PrHelperError;

pub use crate::size::SizeLabel;

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;

/// Default prefix of the size label names, giving `size:xs` .. `size:xl`.
pub const DEFAULT_SIZE_LABEL_PREFIX: &str = "size:";

/// Prefix of the label pointing a split PR at the PR it was split from.
pub const SPLIT_FROM_PREFIX: &str = "split-from:";

/// Prefix of the label carrying a split PR's place in the review order.
pub const REVIEW_ORDER_PREFIX: &str = "review-order:";

/// How stale size labels are cleaned up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelSyncStrategy {
    /// Remove every size label on the PR, the correct one included, then add
    /// the correct label again.
    #[default]
    ClearAndReset,

    /// Only remove size labels that are wrong and only add the correct label
    /// when it is missing. Saves API calls on rate-limited platforms.
    MinimalDiff,
}

/// Configuration of the size labels applied to pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeLabelConfig {
    /// Whether size labels are applied at all
    pub enabled: bool,

    /// Prefix prepended to the size name, e.g. `size:` for `size:m`
    pub prefix: String,

    /// Cleanup strategy for stale size labels
    pub strategy: LabelSyncStrategy,
}

impl Default for SizeLabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: DEFAULT_SIZE_LABEL_PREFIX.to_string(),
            strategy: LabelSyncStrategy::default(),
        }
    }
}

impl SizeLabelConfig {
    /// Names of all five size labels with the configured prefix, smallest first.
    pub fn all_label_names(&self) -> Vec<String> {
        SizeLabel::ALL
            .iter()
            .map(|label| label.label_name(&self.prefix))
            .collect()
    }
}

/// Label changes needed to bring a pull request to the correct size label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDiff {
    pub to_remove: BTreeSet<String>,
    pub to_add: BTreeSet<String>,
}

impl LabelDiff {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Computes the label changes that leave exactly one size label on a PR.
///
/// Labels that are not size labels are never part of the diff.
///
/// # Arguments
///
/// * `current_labels` - Names of the labels currently applied to the PR
/// * `total_lines` - PR-level additions + deletions
/// * `config` - Label prefix and cleanup strategy
///
/// # Examples
///
/// ```
/// use pr_helper_core::labels::{reconcile_size_label, SizeLabelConfig};
///
/// let current = vec!["bug".to_string(), "size:xl".to_string()];
/// let diff = reconcile_size_label(&current, 120, &SizeLabelConfig::default());
///
/// assert!(diff.to_remove.contains("size:xl"));
/// assert!(diff.to_add.contains("size:s"));
/// assert!(!diff.to_remove.contains("bug"));
/// ```
pub fn reconcile_size_label<S: AsRef<str>>(
    current_labels: &[S],
    total_lines: u64,
    config: &SizeLabelConfig,
) -> LabelDiff {
    let selected = SizeLabel::from_line_count(total_lines).label_name(&config.prefix);
    let candidates = config.all_label_names();

    let present: BTreeSet<String> = current_labels
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| candidates.iter().any(|c| c.as_str() == *l))
        .map(str::to_string)
        .collect();

    match config.strategy {
        LabelSyncStrategy::ClearAndReset => LabelDiff {
            to_remove: present,
            to_add: BTreeSet::from([selected]),
        },
        LabelSyncStrategy::MinimalDiff => {
            let already_applied = present.contains(&selected);
            LabelDiff {
                to_remove: present.into_iter().filter(|l| *l != selected).collect(),
                to_add: if already_applied {
                    BTreeSet::new()
                } else {
                    BTreeSet::from([selected])
                },
            }
        }
    }
}

/// Applies the size label for `total_lines` to a pull request.
///
/// Stale size labels are removed one by one. A failed removal is logged and
/// ignored, since the label is usually just not there anymore. Failing to add
/// the selected label is an error.
///
/// # Returns
///
/// The name of the size label the PR carries afterwards.
///
/// # Errors
///
/// Returns [`PrHelperError::FailedToUpdatePullRequest`] when the current labels
/// cannot be listed or the selected label cannot be added.
#[instrument(skip(provider, config))]
pub async fn sync_size_label<P: PullRequestProvider>(
    provider: &P,
    repo_owner: &str,
    repo_name: &str,
    pr_number: u64,
    total_lines: u64,
    config: &SizeLabelConfig,
) -> Result<String, PrHelperError> {
    let current_labels = provider
        .list_labels(repo_owner, repo_name, pr_number)
        .await
        .map_err(|e| {
            warn!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                error = %e,
                "Failed to list labels on pull request"
            );
            PrHelperError::FailedToUpdatePullRequest(
                "Failed to list current PR labels".to_string(),
            )
        })?;

    let current_names: Vec<&str> = current_labels.iter().map(|l| l.name.as_str()).collect();
    let diff = reconcile_size_label(&current_names, total_lines, config);
    let selected = SizeLabel::from_line_count(total_lines).label_name(&config.prefix);

    debug!(
        repository_owner = repo_owner,
        repository = repo_name,
        pull_request = pr_number,
        to_remove = ?diff.to_remove,
        to_add = ?diff.to_add,
        "Reconciled size labels"
    );

    for label in &diff.to_remove {
        if let Err(e) = provider
            .remove_label(repo_owner, repo_name, pr_number, label)
            .await
        {
            debug!(
                repository_owner = repo_owner,
                repository = repo_name,
                pull_request = pr_number,
                label = label.as_str(),
                error = %e,
                "Ignoring failure to remove size label"
            );
        }
    }

    if !diff.to_add.is_empty() {
        let to_add: Vec<String> = diff.to_add.into_iter().collect();
        provider
            .add_labels(repo_owner, repo_name, pr_number, &to_add)
            .await
            .map_err(|e| {
                warn!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    label = selected.as_str(),
                    error = %e,
                    "Failed to add size label to pull request"
                );
                PrHelperError::FailedToUpdatePullRequest("Failed to add size label".to_string())
            })?;
    }

    info!(
        repository_owner = repo_owner,
        repository = repo_name,
        pull_request = pr_number,
        label = selected.as_str(),
        "Applied size label"
    );

    Ok(selected)
}

/// Labels that tie a split PR back to the PR it was split from.
///
/// ```
/// use pr_helper_core::labels::split_tracking_labels;
///
/// assert_eq!(
///     split_tracking_labels(42, 2, 3),
///     vec!["split-from:#42".to_string(), "review-order:2/3".to_string()]
/// );
/// ```
pub fn split_tracking_labels(original_pr: u64, order: u32, total: u32) -> Vec<String> {
    vec![
        format!("{}#{}", SPLIT_FROM_PREFIX, original_pr),
        format!("{}{}/{}", REVIEW_ORDER_PREFIX, order, total),
    ]
}

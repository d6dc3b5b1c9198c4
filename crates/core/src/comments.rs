//! # Bot Comments
//!
//! Markdown bodies of the comments posted on pull requests. Each body starts
//! with a hidden HTML marker so a later run can find and update its own comment.

use indoc::formatdoc;

use crate::labels::{REVIEW_ORDER_PREFIX, SPLIT_FROM_PREFIX};
use crate::size::{Recommendation, SizeEstimate};
use crate::splits::{order_splits, review_order_line, SplitSuggestion};

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;

/// Marker identifying the size-check comment so later runs update it instead of
/// adding another one.
pub const SIZE_COMMENT_MARKER: &str = "<!-- PR_SIZE_CHECK -->";

/// Marker of the notice posted on a PR that was split into smaller PRs.
pub const SPLIT_COMMENT_MARKER: &str = "<!-- PR_SPLIT_NOTICE -->";

fn status_of(recommendation: Recommendation) -> (&'static str, &'static str) {
    match recommendation {
        Recommendation::Ok => ("✅", "Good size for review"),
        Recommendation::Warning => ("⚠️", "Consider splitting before review"),
        Recommendation::SplitRequired => ("🚨", "Split before marking Ready for review"),
    }
}

/// Renders the size-check comment for a pull request.
///
/// Oversized PRs get instructions on how to label the PRs they are split into.
pub fn format_size_comment(estimate: &SizeEstimate, pr_number: u64) -> String {
    let (emoji, status) = status_of(estimate.recommendation);

    let mut comment = formatdoc!(
        "
        {marker}
        ## {emoji} PR Size Check

        **{total} lines** changed across **{files} files**

        | Metric | Value |
        |--------|-------|
        | Additions | +{additions} |
        | Deletions | -{deletions} |
        | Est. Read Time | ~{read_time} min |
        | Cognitive Load | {complexity} |

        **Status:** {status}
        ",
        marker = SIZE_COMMENT_MARKER,
        emoji = emoji,
        status = status,
        total = estimate.total_lines,
        files = estimate.file_count,
        additions = estimate.additions,
        deletions = estimate.deletions,
        read_time = estimate.estimated_read_time_minutes,
        complexity = estimate.cognitive_complexity,
    );

    if estimate.recommendation != Recommendation::Ok {
        comment.push_str(&formatdoc!(
            "

            ---

            ### After splitting, add these labels:

            ```
            {split_from}#{pr_number}
            {review_order}1/<total>, {review_order}2/<total>, etc.
            ```
            ",
            split_from = SPLIT_FROM_PREFIX,
            pr_number = pr_number,
            review_order = REVIEW_ORDER_PREFIX,
        ));
    }

    comment
}

/// Renders the notice posted on a PR that was split into smaller PRs.
///
/// Splits are listed in review order with their position, followed by the
/// whole order on a single line.
pub fn format_split_closed_comment(original_pr: u64, splits: &[SplitSuggestion]) -> String {
    let ordered = order_splits(splits);

    let split_list = ordered
        .iter()
        .map(|o| format!("- #{} - {} (review {})", o.split.number, o.split.title, o.position))
        .collect::<Vec<_>>()
        .join("\n");

    formatdoc!(
        "
        {marker}
        ## ⚠️ PR #{original_pr} split into {count} smaller PRs

        {split_list}

        **Review order:** {order}

        ---

        <sub>PR Helper | Split for easier review</sub>",
        marker = SPLIT_COMMENT_MARKER,
        original_pr = original_pr,
        split_list = split_list,
        count = ordered.len(),
        order = review_order_line(&ordered),
    )
}

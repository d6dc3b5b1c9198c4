use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use pr_helper_core::comments::format_split_closed_comment;
use pr_helper_core::labels::split_tracking_labels;
use pr_helper_core::splits::{order_splits, SplitSuggestion};
use tracing::{instrument, warn};

use crate::errors::CliError;

#[cfg(test)]
#[path = "splits_tests.rs"]
mod tests;

/// Arguments for the splits command
#[derive(Args, Debug)]
pub struct SplitsArgs {
    /// JSON file with the list of split pull requests
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of the pull request that was split
    #[arg(short, long)]
    pub original: u64,

    /// Also print the tracking labels for every split
    #[arg(long)]
    pub labels: bool,
}

/// Renders the split notice and, optionally, the tracking labels per split.
pub fn render_splits(
    original: u64,
    splits: &[SplitSuggestion],
    with_labels: bool,
) -> Result<String, CliError> {
    if splits.is_empty() {
        return Err(CliError::InvalidArguments(
            "The split list is empty".to_string(),
        ));
    }

    let mut seen = BTreeSet::new();
    for split in splits {
        if split.order == 0 {
            return Err(CliError::InvalidArguments(format!(
                "Split #{} has order 0; orders start at 1",
                split.number
            )));
        }
        if !seen.insert(split.order) {
            warn!(
                order = split.order,
                "Several splits share the same order. Their relative order is not meaningful."
            );
        }
    }

    let mut output = format_split_closed_comment(original, splits);

    if with_labels {
        let total = splits.len() as u32;
        output.push_str("\n\n");
        for ordered in order_splits(splits) {
            let labels = split_tracking_labels(original, ordered.split.order, total);
            output.push_str(&format!("#{}: {}\n", ordered.split.number, labels.join(", ")));
        }
    }

    Ok(output)
}

/// Execute the splits command
#[instrument]
pub async fn execute(args: SplitsArgs) -> Result<(), CliError> {
    let content = fs::read_to_string(&args.input).map_err(|e| {
        CliError::IoError(format!("Failed to read {:?}: {}", args.input, e))
    })?;
    let splits: Vec<SplitSuggestion> = serde_json::from_str(&content).map_err(|e| {
        CliError::InvalidArguments(format!("Failed to parse {:?}: {}", args.input, e))
    })?;

    println!("{}", render_splits(args.original, &splits, args.labels)?);
    Ok(())
}

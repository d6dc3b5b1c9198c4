use std::fs;
use std::path::PathBuf;

use clap::Args;
use pr_helper_core::comments::format_size_comment;
use pr_helper_core::config::PrHelperConfig;
use pr_helper_core::labels::{reconcile_size_label, LabelDiff};
use pr_helper_core::size::{estimate_size, SizeEstimate};
use pr_helper_developer_platforms::models::{PullRequest, PullRequestFile};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::load_local_config;
use crate::errors::CliError;

#[cfg(test)]
#[path = "estimate_tests.rs"]
mod tests;

/// Arguments for the estimate command
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// JSON file with the pull request, its changed files and current labels
    #[arg(short, long)]
    pub input: PathBuf,

    /// Alternate config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the size comment as markdown instead of the JSON report
    #[arg(long)]
    pub comment: bool,
}

/// Snapshot of a pull request as read from the input file
#[derive(Debug, Deserialize)]
pub struct EstimateInput {
    /// The pull request with its PR-level line totals
    pub pull_request: PullRequest,

    /// The changed files
    #[serde(default)]
    pub files: Vec<PullRequestFile>,

    /// Labels currently applied to the pull request
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Report printed by the estimate command
#[derive(Debug, Serialize)]
pub struct EstimateReport {
    /// The size estimate
    pub estimate: SizeEstimate,

    /// The size label the pull request should carry
    pub size_label: String,

    /// Label changes needed to get there
    pub label_diff: LabelDiff,
}

/// Estimates a pull request snapshot and reconciles its labels.
pub fn build_report(input: &EstimateInput, config: &PrHelperConfig) -> EstimateReport {
    let estimate = estimate_size(
        &input.files,
        input.pull_request.additions,
        input.pull_request.deletions,
        &config.to_size_policy(),
        &config.complexity_weights(),
    );

    let label_config = config.label_config();
    let label_diff = reconcile_size_label(&input.labels, estimate.total_lines, label_config);
    let size_label = estimate.size_label().label_name(&label_config.prefix);

    EstimateReport {
        estimate,
        size_label,
        label_diff,
    }
}

/// Execute the estimate command
#[instrument]
pub async fn execute(args: EstimateArgs) -> Result<(), CliError> {
    let config = load_local_config(args.config.as_deref())?;

    debug!("Reading pull request snapshot from {:?}", args.input);
    let content = fs::read_to_string(&args.input).map_err(|e| {
        CliError::IoError(format!("Failed to read {:?}: {}", args.input, e))
    })?;
    let input: EstimateInput = serde_json::from_str(&content).map_err(|e| {
        CliError::InvalidArguments(format!("Failed to parse {:?}: {}", args.input, e))
    })?;

    let report = build_report(&input, &config);

    if args.comment {
        println!(
            "{}",
            format_size_comment(&report.estimate, input.pull_request.number)
        );
    } else {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Other(format!("Failed to serialize the report: {}", e)))?;
        println!("{}", json);
    }

    Ok(())
}

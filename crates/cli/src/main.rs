//! # PR Helper CLI
//!
//! Command-line interface for estimating the review size of pull requests.
//!
//! This binary estimates how long a pull request takes to review, keeps its
//! size label and size comment up to date, and renders the notice posted when
//! a pull request is split into smaller ones.
//!
//! # Commands
//!
//! - `estimate` - Estimate the size of a pull request snapshot stored as JSON
//! - `check-pr` - Estimate a pull request on GitHub and update its size label
//! - `splits` - Render the notice for a pull request that was split
//! - `config` - Manage the policy file
//!
//! # Examples
//!
//! ```bash
//! # Check a pull request without changing anything
//! pr-helper check-pr --repo owner/repo --pr 123 --dry-run
//!
//! # Estimate an exported snapshot
//! pr-helper estimate --input pr.json
//!
//! # Create a policy file with the defaults
//! pr-helper config init
//! ```

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use std::process::{ExitCode, Termination};

use clap::{Parser, Subcommand};
use tracing::{debug, error};

/// Command implementations for the CLI.
mod commands;

/// Configuration management for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

use commands::{
    check_pr::CheckPrArgs, config_cmd::ConfigCommands, estimate::EstimateArgs,
    splits::SplitsArgs,
};
use errors::CliError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
const LOG_ENV_VAR: &str = "PR_HELPER_LOG";

/// Command-line interface structure for the PR helper.
///
/// Holds the global options and the subcommand to run.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for the PR helper CLI.
#[derive(Subcommand)]
enum Commands {
    /// Estimate the review size of a pull request snapshot
    Estimate(EstimateArgs),

    /// Estimate a pull request on GitHub and update its size label
    #[command(name = "check-pr")]
    CheckPr(CheckPrArgs),

    /// Render the notice for a pull request that was split
    Splits(SplitsArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Sets up logging to stderr so that command output on stdout stays parseable.
///
/// `PR_HELPER_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Dispatches to the command handler.
async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Estimate(args) => commands::estimate::execute(args)
            .await
            .inspect_err(|e| error!("Error estimating pull request: {}", e)),
        Commands::CheckPr(args) => commands::check_pr::execute(args)
            .await
            .inspect_err(|e| error!("Error checking pull request: {}", e)),
        Commands::Splits(args) => commands::splits::execute(args)
            .await
            .inspect_err(|e| error!("Error rendering split notice: {}", e)),
        Commands::Config(cmd) => commands::config_cmd::execute(cmd)
            .await
            .inspect_err(|e| error!("Error executing config command: {}", e)),
    }
}

/// Main entry point for the PR helper CLI.
///
/// Parses the command line, initializes logging and runs the command. The
/// exit code reflects the kind of failure, see [`CliError`].
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Verbose mode enabled");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.report()
        }
    }
}

/// Pull request size checks against GitHub
pub mod check_pr;
/// Policy file management commands
pub mod config_cmd;
/// Offline size estimates from a pull request snapshot
pub mod estimate;
/// Split notices and tracking labels for split pull requests
pub mod splits;

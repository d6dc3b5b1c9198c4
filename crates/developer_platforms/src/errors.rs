#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// This enum represents the failures that can occur when reading pull requests
/// from, or writing labels and comments to, a developer platform such as GitHub.
///
/// # Examples
///
/// ```rust
/// use pr_helper_developer_platforms::errors::Error;
///
/// let auth_error = Error::AuthError("Invalid token".to_string());
/// println!("{}", auth_error);
///
/// let rate_limit = Error::RateLimitExceeded;
/// assert_eq!(rate_limit.to_string(), "Rate limit exceeded");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic API request failure.
    ///
    /// Used as a fallback when the platform did not give more specific
    /// information about the failure.
    #[error("API request failed")]
    ApiError(),

    /// Authentication failed with the platform.
    ///
    /// The provided token is invalid, expired, or lacks the permissions for the
    /// requested operation.
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Failed to update pull request.
    ///
    /// Adding or removing labels, or creating, editing or deleting comments
    /// failed. The string parameter names the operation.
    #[error("Failed to update the PR: {0}")]
    FailedToUpdatePullRequest(String),

    /// Invalid response format from platform API.
    ///
    /// The response could not be mapped onto the expected models, for example
    /// because a required field was missing.
    #[error("Invalid response format")]
    InvalidResponse,

    /// Platform rate limit exceeded.
    ///
    /// Retrying is the caller's responsibility. Label reconciliation is
    /// idempotent, so re-running a whole check after the window resets is safe.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

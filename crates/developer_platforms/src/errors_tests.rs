use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::ApiError();

    assert_eq!(error.to_string(), "API request failed");
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Invalid credentials".to_string());

    assert_eq!(
        error.to_string(),
        "Authentication failed: Invalid credentials"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_failed_to_update_pull_request_error() {
    let error = Error::FailedToUpdatePullRequest("Failed to remove label".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to update the PR: Failed to remove label"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_invalid_response_error() {
    let error = Error::InvalidResponse;

    assert_eq!(error.to_string(), "Invalid response format");
}

#[test]
fn test_rate_limit_exceeded_error() {
    let error = Error::RateLimitExceeded;

    assert_eq!(error.to_string(), "Rate limit exceeded");
}

#[test]
fn test_error_debug_format() {
    let error = Error::AuthError("expired".to_string());

    let debug = format!("{:?}", error);
    assert!(debug.contains("AuthError"));
    assert!(debug.contains("expired"));
}

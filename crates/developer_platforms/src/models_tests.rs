use super::*;
use serde_json::{from_str, to_string};

#[test]
fn test_comment_deserialization() {
    let json_str = r#"{"id": 456, "body": "Deserialized comment"}"#;

    let comment: Comment = from_str(json_str).expect("Failed to deserialize Comment");

    assert_eq!(comment.id, 456);
    assert_eq!(comment.body, "Deserialized comment");
}

#[test]
fn test_label_serialization() {
    let label = Label {
        name: "size:xl".to_string(),
    };

    let json_str = to_string(&label).expect("Failed to serialize Label");

    let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("Failed to parse JSON");
    assert_eq!(parsed["name"], "size:xl");
}

#[test]
fn test_pull_request_deserialization_with_defaults() {
    // Only the identifying fields are present
    let json_str = r#"{"number": 7, "title": "docs: fix typo"}"#;

    let pr: PullRequest = from_str(json_str).expect("Failed to deserialize PullRequest");

    assert_eq!(pr.number, 7);
    assert_eq!(pr.title, "docs: fix typo");
    assert_eq!(pr.body, None);
    assert!(!pr.draft);
    assert_eq!(pr.additions, 0);
    assert_eq!(pr.deletions, 0);
    assert_eq!(pr.changed_files, 0);
}

#[test]
fn test_pull_request_deserialization_full() {
    let json_str = r#"{
        "number": 42,
        "title": "feat: add cache",
        "body": "Adds a cache",
        "draft": true,
        "additions": 400,
        "deletions": 200,
        "changed_files": 3
    }"#;

    let pr: PullRequest = from_str(json_str).expect("Failed to deserialize PullRequest");

    assert_eq!(pr.body.as_deref(), Some("Adds a cache"));
    assert!(pr.draft);
    assert_eq!(pr.additions, 400);
    assert_eq!(pr.deletions, 200);
    assert_eq!(pr.changed_files, 3);
}

#[test]
fn test_pull_request_file_keeps_reported_changes() {
    // The platform total is kept even when it disagrees with additions + deletions
    let json_str = r#"{
        "filename": "src/main.rs",
        "status": "renamed",
        "additions": 3,
        "deletions": 1,
        "changes": 10,
        "previous_filename": "src/old_main.rs"
    }"#;

    let file: PullRequestFile = from_str(json_str).expect("Failed to deserialize PullRequestFile");

    assert_eq!(file.changes, 10);
    assert_eq!(file.status, "renamed");
    assert_eq!(file.previous_filename.as_deref(), Some("src/old_main.rs"));
    assert_eq!(file.patch, None);
}

#[test]
fn test_pull_request_file_serialization_skips_missing_optionals() {
    let file = PullRequestFile {
        filename: "README.md".to_string(),
        status: "modified".to_string(),
        additions: 1,
        deletions: 0,
        changes: 1,
        patch: None,
        previous_filename: None,
    };

    let json_str = to_string(&file).expect("Failed to serialize PullRequestFile");
    let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("Failed to parse JSON");

    assert_eq!(parsed["filename"], "README.md");
    assert!(parsed.get("patch").is_none());
    assert!(parsed.get("previous_filename").is_none());
}

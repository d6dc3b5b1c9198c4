//! Tests for the default methods of the `PullRequestProvider` trait.

use crate::errors::Error;
use crate::models::{Comment, Label, PullRequest, PullRequestFile};
use crate::PullRequestProvider;
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory provider that only tracks comments
#[derive(Debug, Default)]
struct CommentOnlyProvider {
    comments: Mutex<Vec<Comment>>,
    next_id: Mutex<u64>,
}

impl CommentOnlyProvider {
    fn with_comments(comments: Vec<Comment>) -> Self {
        let next_id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            comments: Mutex::new(comments),
            next_id: Mutex::new(next_id),
        }
    }

    fn comments(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl PullRequestProvider for CommentOnlyProvider {
    async fn get_pull_request(&self, _: &str, _: &str, _: u64) -> Result<PullRequest, Error> {
        unimplemented!("Not needed for this test")
    }

    async fn get_pull_request_files(
        &self,
        _: &str,
        _: &str,
        _: u64,
    ) -> Result<Vec<PullRequestFile>, Error> {
        unimplemented!("Not needed for this test")
    }

    async fn add_comment(&self, _: &str, _: &str, _: u64, comment: &str) -> Result<(), Error> {
        let mut next_id = self.next_id.lock().unwrap();
        self.comments.lock().unwrap().push(Comment {
            id: *next_id,
            body: comment.to_string(),
        });
        *next_id += 1;
        Ok(())
    }

    async fn update_comment(
        &self,
        _: &str,
        _: &str,
        comment_id: u64,
        comment: &str,
    ) -> Result<(), Error> {
        let mut comments = self.comments.lock().unwrap();
        match comments.iter_mut().find(|c| c.id == comment_id) {
            Some(existing) => {
                existing.body = comment.to_string();
                Ok(())
            }
            None => Err(Error::FailedToUpdatePullRequest(
                "Comment not found".to_string(),
            )),
        }
    }

    async fn delete_comment(&self, _: &str, _: &str, _: u64) -> Result<(), Error> {
        unimplemented!("Not needed for this test")
    }

    async fn list_comments(&self, _: &str, _: &str, _: u64) -> Result<Vec<Comment>, Error> {
        Ok(self.comments())
    }

    async fn add_labels(&self, _: &str, _: &str, _: u64, _: &[String]) -> Result<(), Error> {
        unimplemented!("Not needed for this test")
    }

    async fn remove_label(&self, _: &str, _: &str, _: u64, _: &str) -> Result<(), Error> {
        unimplemented!("Not needed for this test")
    }

    async fn list_labels(&self, _: &str, _: &str, _: u64) -> Result<Vec<Label>, Error> {
        unimplemented!("Not needed for this test")
    }
}

const MARKER: &str = "<!-- TEST_MARKER -->";

#[tokio::test]
async fn test_upsert_comment_adds_when_missing() {
    let provider = CommentOnlyProvider::with_comments(vec![Comment {
        id: 1,
        body: "An unrelated review comment".to_string(),
    }]);

    let body = format!("{}\nfirst version", MARKER);
    let updated = provider
        .upsert_comment("owner", "repo", 1, MARKER, &body)
        .await
        .unwrap();

    assert!(!updated);
    let comments = provider.comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].body, body);
}

#[tokio::test]
async fn test_upsert_comment_updates_existing_marker_comment() {
    let provider = CommentOnlyProvider::with_comments(vec![
        Comment {
            id: 1,
            body: "An unrelated review comment".to_string(),
        },
        Comment {
            id: 2,
            body: format!("{}\nold version", MARKER),
        },
    ]);

    let body = format!("{}\nnew version", MARKER);
    let updated = provider
        .upsert_comment("owner", "repo", 1, MARKER, &body)
        .await
        .unwrap();

    assert!(updated);
    let comments = provider.comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].id, 2);
    assert_eq!(comments[1].body, body);
}

#[tokio::test]
async fn test_upsert_comment_is_stable_across_runs() {
    let provider = CommentOnlyProvider::default();
    let body = format!("{}\nsame", MARKER);

    provider
        .upsert_comment("owner", "repo", 1, MARKER, &body)
        .await
        .unwrap();
    provider
        .upsert_comment("owner", "repo", 1, MARKER, &body)
        .await
        .unwrap();

    assert_eq!(provider.comments().len(), 1);
}

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{ChangedFile, Label, Page};

use async_trait::async_trait;
use thiserror::Error;

use crate::pr::PullRequestId;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub API responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid GitHub API URL: {0}")]
    InvalidUrl(String),
}

/// The slice of the issue tracker API the action needs.
///
/// Listing calls take a 1-based page number and return a single [`Page`];
/// callers drive pagination themselves.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn list_pull_request_files(
        &self,
        pr: &PullRequestId,
        page: u32,
    ) -> Result<Page<ChangedFile>, GitHubError>;

    async fn list_issue_labels(
        &self,
        pr: &PullRequestId,
        page: u32,
    ) -> Result<Page<Label>, GitHubError>;

    async fn remove_issue_label(&self, pr: &PullRequestId, label: &str)
        -> Result<(), GitHubError>;

    async fn add_issue_labels(
        &self,
        pr: &PullRequestId,
        labels: &[String],
    ) -> Result<(), GitHubError>;
}

use thiserror::Error;
use tracing::{info, info_span, Instrument};

use crate::config::{Config, ConfigError};
use crate::github::{GitHubClient, GitHubError, IssueTracker};
use crate::label::{self, LabelError};
use crate::pr::{self, PrError, PullRequestId};
use crate::report::{Outcome, ReportError};
use crate::size::Size;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unable to create a GitHub client: {0}")]
    Client(#[from] GitHubError),

    #[error("unable to get the number of changed lines in a pull request: {0}")]
    CountChanges(#[from] PrError),

    #[error("unable to set a label on a pull request: {0}")]
    SetLabel(#[from] LabelError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl ActionError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ActionError::Config(_) | ActionError::Client(_) => 2,
            ActionError::CountChanges(_) => 3,
            ActionError::SetLabel(err) if err.is_mutation() => 4,
            ActionError::SetLabel(_) => 3,
            ActionError::Report(_) => 1,
        }
    }
}

/// Which pull request to label.
#[derive(Debug, Clone)]
pub enum Target {
    /// Read it from the triggering event payload.
    Event,
    /// An explicit pull request URL.
    Url(String),
}

/// Resolve the pull request the run is about.
pub fn resolve_target(target: &Target, config: &Config) -> Result<PullRequestId, ConfigError> {
    match target {
        Target::Event => pr::event::load_pull_request_event(&config.event),
        Target::Url(url) => pr::parse_pr_url(url),
    }
}

/// Build an API client from the configuration.
pub fn client(config: &Config) -> Result<GitHubClient, GitHubError> {
    GitHubClient::new(config.api_url(), config.github_token())
}

/// Count, classify and label one pull request.
pub async fn run(tracker: &dyn IssueTracker, pr: PullRequestId) -> Result<Outcome, ActionError> {
    let span = info_span!("pr_size", owner = %pr.owner, repo = %pr.repo, number = pr.number);
    async move {
        let changed_lines = pr::count_changed_lines(tracker, &pr).await?;
        let size = Size::classify(changed_lines);
        info!(changed_lines, size = %size, "got a size of a pull request");

        let reconciliation = label::reconcile_size_label(tracker, &pr, size).await?;
        info!(size = %size, "set a label to represent a pull request size");

        Ok(Outcome {
            pull_request: pr,
            changed_lines,
            size,
            reconciliation,
        })
    }
    .instrument(span)
    .await
}

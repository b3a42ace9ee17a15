pub mod event;
pub mod types;

pub use types::PullRequestId;

use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::ConfigError;
use crate::github::{GitHubError, IssueTracker};

#[derive(Debug, Error)]
pub enum PrError {
    #[error("failed to list files changed by the pull request (page {page}): {source}")]
    ListFiles {
        page: u32,
        #[source]
        source: GitHubError,
    },
}

/// Parse a GitHub PR URL into its component parts.
///
/// Expected format: https://github.com/{owner}/{repo}/pull/{number}
pub fn parse_pr_url(url: &str) -> Result<PullRequestId, ConfigError> {
    let invalid = || ConfigError::InvalidPrUrl(url.to_string());
    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;

    if parsed.host_str() != Some("github.com") {
        return Err(invalid());
    }

    let segments: Vec<_> = parsed
        .path_segments()
        .ok_or_else(invalid)?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() != 4 || segments[2] != "pull" {
        return Err(invalid());
    }

    let number = segments[3].parse::<u64>().map_err(|_| invalid())?;

    Ok(PullRequestId {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        number,
    })
}

/// Total number of changed lines (additions + deletions) across every file
/// of the pull request.
///
/// Walks the files listing one page at a time until the last page. Any failed
/// page aborts the whole count.
#[instrument(skip(tracker), fields(owner = %pr.owner, repo = %pr.repo, number = pr.number))]
pub async fn count_changed_lines(
    tracker: &dyn IssueTracker,
    pr: &PullRequestId,
) -> Result<u64, PrError> {
    let mut total = 0;
    let mut page = 1;
    loop {
        let listing = tracker
            .list_pull_request_files(pr, page)
            .await
            .map_err(|source| {
                error!(page, error = %source, "failed to list files changed by a pull request");
                PrError::ListFiles { page, source }
            })?;

        let changes: u64 = listing.items.iter().map(|file| file.changes()).sum();
        debug!(page, files = listing.items.len(), changes, "counted page");
        total += changes;

        if listing.is_last() {
            break;
        }
        page += 1;
    }
    Ok(total)
}

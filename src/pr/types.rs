use std::fmt;

use serde::Deserialize;

/// Identifies the pull request being labeled. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestId {
    /// Repository owner login (e.g., "octo")
    pub owner: String,
    /// Repository name (e.g., "widgets")
    pub repo: String,
    /// Pull request number, shared with its tracking issue
    pub number: u64,
}

impl fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// The parts of a `pull_request` webhook payload the action reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub repository: EventRepository,
    pub pull_request: EventPullRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepository {
    pub name: String,
    pub owner: EventUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventUser {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventPullRequest {
    pub number: u64,
}

impl From<PullRequestEvent> for PullRequestId {
    fn from(event: PullRequestEvent) -> Self {
        PullRequestId {
            owner: event.repository.owner.login,
            repo: event.repository.name,
            number: event.pull_request.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let pr = PullRequestId {
            owner: "octo".to_string(),
            repo: "widgets".to_string(),
            number: 7,
        };
        assert_eq!(pr.to_string(), "octo/widgets#7");
    }
}

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use super::types::{PullRequestEvent, PullRequestId};
use crate::config::{ConfigError, EventConfig};

/// The only event kind the action knows how to handle.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Validate the triggering event kind and read the pull request it refers to.
#[instrument(skip(event), fields(name = event.name.as_deref().unwrap_or_default()))]
pub fn load_pull_request_event(event: &EventConfig) -> Result<PullRequestId, ConfigError> {
    let name = event.name.as_deref().unwrap_or_default();
    if name != PULL_REQUEST_EVENT {
        return Err(ConfigError::UnsupportedEvent(name.to_string()));
    }

    let path = event.path.as_deref().ok_or(ConfigError::MissingEventPath)?;
    read_event_file(path)
}

pub fn read_event_file(path: &Path) -> Result<PullRequestId, ConfigError> {
    debug!(path = %path.display(), "reading event payload");
    let payload = fs::read_to_string(path).map_err(|source| ConfigError::EventRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_event(&payload)
}

pub fn parse_event(payload: &str) -> Result<PullRequestId, ConfigError> {
    let event: PullRequestEvent = serde_json::from_str(payload)?;
    Ok(event.into())
}

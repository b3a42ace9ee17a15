use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::github::{GitHubError, IssueTracker};
use crate::pr::PullRequestId;
use crate::size::{self, Size};

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to list labels on the pull request (page {page}): {source}")]
    List {
        page: u32,
        #[source]
        source: GitHubError,
    },

    #[error("failed to remove label {label:?} from the pull request: {source}")]
    Remove {
        label: String,
        #[source]
        source: GitHubError,
    },

    #[error("failed to add label {label:?} to the pull request: {source}")]
    Add {
        label: String,
        #[source]
        source: GitHubError,
    },
}

impl LabelError {
    /// Whether the failure happened while changing labels rather than reading them.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, LabelError::List { .. })
    }
}

/// What the reconciler did to the pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The target label was already present; nothing changed.
    AlreadyLabeled,
    /// Stale size labels were removed (in the order they were found) and the
    /// target label was added.
    Relabeled { removed: Vec<String>, added: String },
}

/// Make `target` the only size label on the pull request.
///
/// Labels are scanned page by page. Every managed label other than the target
/// is removed as soon as it is seen. Finding the target label ends the scan
/// right away with no further changes, so stale size labels on later pages
/// are left alone.
///
/// Removals are not rolled back if a later call fails.
#[instrument(skip(tracker), fields(owner = %pr.owner, repo = %pr.repo, number = pr.number, label = target.label()))]
pub async fn reconcile_size_label(
    tracker: &dyn IssueTracker,
    pr: &PullRequestId,
    target: Size,
) -> Result<Reconciliation, LabelError> {
    let wanted = target.label();
    let mut removed = Vec::new();
    let mut page = 1;

    loop {
        let listing = tracker.list_issue_labels(pr, page).await.map_err(|source| {
            error!(page, error = %source, "failed to list labels on a pull request");
            LabelError::List { page, source }
        })?;
        let is_last = listing.is_last();

        for label in listing.items {
            if !size::is_managed(&label.name) {
                continue;
            }
            if label.name == wanted {
                info!("the pull request already has the label");
                return Ok(Reconciliation::AlreadyLabeled);
            }
            if Size::from_label(&label.name) == Some(Size::Unknown) {
                warn!(remove = %label.name, "removing a size label with an unrecognised size");
            }

            tracker
                .remove_issue_label(pr, &label.name)
                .await
                .map_err(|source| {
                    error!(remove = %label.name, error = %source, "failed to remove a label from a pull request");
                    LabelError::Remove {
                        label: label.name.clone(),
                        source,
                    }
                })?;
            info!(remove = %label.name, "a label was removed from the pull request");
            removed.push(label.name);
        }

        if is_last {
            break;
        }
        page += 1;
    }

    tracker
        .add_issue_labels(pr, &[wanted.to_string()])
        .await
        .map_err(|source| {
            error!(error = %source, "failed to add a label to a pull request");
            LabelError::Add {
                label: wanted.to_string(),
                source,
            }
        })?;
    info!("a label was added to the pull request");

    Ok(Reconciliation::Relabeled {
        removed,
        added: wanted.to_string(),
    })
}

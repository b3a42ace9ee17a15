use crate::label::Reconciliation;
use crate::pr::PullRequestId;
use crate::size::Size;

/// Everything a successful run found out and changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub pull_request: PullRequestId,
    /// Additions plus deletions across all changed files
    pub changed_lines: u64,
    pub size: Size,
    pub reconciliation: Reconciliation,
}

impl Outcome {
    /// Labels removed during the run, in removal order.
    pub fn removed_labels(&self) -> &[String] {
        match &self.reconciliation {
            Reconciliation::AlreadyLabeled => &[],
            Reconciliation::Relabeled { removed, .. } => removed,
        }
    }

    /// The label added during the run, if any.
    pub fn added_label(&self) -> Option<&str> {
        match &self.reconciliation {
            Reconciliation::AlreadyLabeled => None,
            Reconciliation::Relabeled { added, .. } => Some(added),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(reconciliation: Reconciliation) -> Outcome {
        Outcome {
            pull_request: PullRequestId {
                owner: "octo".to_string(),
                repo: "widgets".to_string(),
                number: 42,
            },
            changed_lines: 120,
            size: Size::L,
            reconciliation,
        }
    }

    #[test]
    fn test_already_labeled_has_no_changes() {
        let outcome = outcome(Reconciliation::AlreadyLabeled);
        assert!(outcome.removed_labels().is_empty());
        assert_eq!(outcome.added_label(), None);
    }

    #[test]
    fn test_relabeled_changes() {
        let outcome = outcome(Reconciliation::Relabeled {
            removed: vec!["size/M".to_string()],
            added: "size/L".to_string(),
        });
        assert_eq!(outcome.removed_labels(), ["size/M".to_string()]);
        assert_eq!(outcome.added_label(), Some("size/L"));
    }
}

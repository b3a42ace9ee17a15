use serde::{Deserialize, Serialize};

/// A file touched by a pull request, as returned by the pull request files API.
/// Only the line counts are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl ChangedFile {
    /// Lines added plus lines deleted.
    pub fn changes(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// A label attached to an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Request body for adding labels to an issue.
#[derive(Debug, Serialize)]
pub(crate) struct AddLabels<'a> {
    pub labels: &'a [String],
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based number of this page.
    pub page: u32,
    /// Last page advertised by the `Link` header. GitHub leaves it out on the
    /// final page itself.
    pub last_page: Option<u32>,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.last_page.map_or(true, |last| self.page >= last)
    }
}

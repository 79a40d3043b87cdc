//! Pull request domain types.
//!
//! These are plain data holders produced by the GitHub layer and consumed
//! by the rule checks. Nothing in here talks to the network.

use crate::error::Result;

/// Placeholder shown when a commit sha is missing from the API response.
const MISSING_SHA: &str = "???????";

/// Placeholder shown when a commit has no message.
const MISSING_MESSAGE: &str = "(no message)";

/// A single commit on the pull request branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    /// Number of parent commits. Two or more means a merge commit.
    pub parent_count: usize,
}

impl Commit {
    /// Abbreviated sha for display (first 7 characters).
    pub fn short_sha(&self) -> &str {
        if self.sha.is_empty() {
            MISSING_SHA
        } else if self.sha.len() > 7 {
            &self.sha[..7]
        } else {
            &self.sha
        }
    }

    /// First line of the commit message, for display.
    pub fn summary(&self) -> &str {
        if self.message.is_empty() {
            MISSING_MESSAGE
        } else {
            self.message.lines().next().unwrap_or(MISSING_MESSAGE)
        }
    }

    /// Whether this is a merge commit (more than one parent).
    pub fn is_merge(&self) -> bool {
        self.parent_count > 1
    }
}

/// Everything the checks need to know about the pull request under review.
///
/// Captured once at the start of a review; checks never re-fetch.
#[derive(Debug, Clone)]
pub struct PrSnapshot {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub title: String,
    /// Branch the PR merges into (e.g. `main`, `release/3.2`).
    pub base_branch: String,
    /// Branch the PR merges from.
    pub head_branch: String,
    pub html_url: String,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    pub commits: Vec<Commit>,
}

impl PrSnapshot {
    /// Total changed lines (additions + deletions).
    pub fn total_lines(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// File paths touched by a pull request, partitioned by change kind.
///
/// Renames and copies are counted as modifications.
#[derive(Debug, Clone, Default)]
pub struct FileChangeSet {
    pub created: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl FileChangeSet {
    pub fn new(created: Vec<String>, modified: Vec<String>, deleted: Vec<String>) -> Self {
        Self {
            created,
            modified,
            deleted,
        }
    }

    /// Total number of touched files across all change kinds.
    pub fn total_files(&self) -> usize {
        self.created.len() + self.modified.len() + self.deleted.len()
    }

    /// Iterate over every touched path, regardless of change kind.
    pub fn all_paths(&self) -> impl Iterator<Item = &str> {
        self.created
            .iter()
            .chain(self.modified.iter())
            .chain(self.deleted.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.total_files() == 0
    }
}

/// State of a pull request found by a mainline search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrStatus {
    Open,
    Merged,
    Closed,
}

impl PrStatus {
    pub fn name(&self) -> &'static str {
        match self {
            PrStatus::Open => "open",
            PrStatus::Merged => "merged",
            PrStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Details fetched for a single PR by number, used to confirm mainline links.
#[derive(Debug, Clone)]
pub struct PrDetail {
    pub number: u64,
    pub base_branch: String,
    /// Raw state string from the API (`open` or `closed`).
    pub state: String,
    pub merged: bool,
    pub html_url: String,
}

impl PrDetail {
    /// Classify the PR state. Merged wins over the raw state string.
    pub fn status(&self) -> PrStatus {
        if self.merged {
            PrStatus::Merged
        } else if self.state == "open" {
            PrStatus::Open
        } else {
            PrStatus::Closed
        }
    }
}

/// A confirmed link from an issue key to a PR targeting the mainline branch.
#[derive(Debug, Clone)]
pub struct MainlinePrLink {
    pub number: u64,
    pub html_url: String,
    pub status: PrStatus,
}

/// Lookup interface used by the mainline linkage check.
///
/// The production implementation shells out to `gh`; tests substitute
/// an in-memory fake.
pub trait PrLookup {
    /// Search for PR numbers matching a GitHub search query.
    fn search_pr_numbers(&self, query: &str) -> Result<Vec<u64>>;

    /// Fetch details for one PR by number.
    fn fetch_pr(&self, owner: &str, repo: &str, number: u64) -> Result<PrDetail>;
}

//! Test utilities shared across modules.
//!
//! Provides a synchronization primitive for tests that touch process
//! environment variables, plus small builders and a fake PR lookup for
//! exercising the checks without a network.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{Result, WardenError};
use crate::pr::{Commit, PrDetail, PrLookup, PrSnapshot};

/// Mutex to serialize tests that read or modify environment variables.
///
/// Environment variables are process-global, so tests that set or remove
/// them must acquire this mutex to prevent races during parallel test
/// execution.
///
/// # Example
///
/// ```ignore
/// use crate::test_utils::ENV_MUTEX;
///
/// #[test]
/// fn test_that_sets_env() {
///     let _lock = ENV_MUTEX.lock().unwrap();
///     // ... test code that sets or unsets env vars ...
/// }
/// ```
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Build a commit with the given sha, message, and parent count.
pub fn commit(sha: &str, message: &str, parent_count: usize) -> Commit {
    Commit {
        sha: sha.to_string(),
        message: message.to_string(),
        parent_count,
    }
}

/// Build a minimal snapshot with the given title and base branch.
pub fn snapshot(title: &str, base_branch: &str) -> PrSnapshot {
    PrSnapshot {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: 42,
        title: title.to_string(),
        base_branch: base_branch.to_string(),
        head_branch: "feature/work".to_string(),
        html_url: "https://github.com/acme/widgets/pull/42".to_string(),
        additions: 10,
        deletions: 5,
        changed_files: 2,
        commits: vec![commit("abcdef0123456789", "MPT-1 Change things", 1)],
    }
}

/// Build a PR detail record for the fake lookup.
pub fn pr_detail(number: u64, base_branch: &str, state: &str, merged: bool) -> PrDetail {
    PrDetail {
        number,
        base_branch: base_branch.to_string(),
        state: state.to_string(),
        merged,
        html_url: format!("https://github.com/acme/widgets/pull/{}", number),
    }
}

/// In-memory stand-in for the GitHub search and fetch endpoints.
///
/// Search results are keyed by a needle: a query matches an entry when it
/// contains the needle as a substring.
#[derive(Default)]
pub struct FakeLookup {
    searches: Vec<(String, Vec<u64>)>,
    prs: HashMap<u64, PrDetail>,
    fail_all_searches: bool,
    failing_search_needles: Vec<String>,
    failing_fetches: HashSet<u64>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries containing `needle` return these PR numbers.
    pub fn with_search(mut self, needle: &str, numbers: Vec<u64>) -> Self {
        self.searches.push((needle.to_string(), numbers));
        self
    }

    pub fn with_pr(mut self, detail: PrDetail) -> Self {
        self.prs.insert(detail.number, detail);
        self
    }

    /// Every search returns an error.
    pub fn failing_searches(mut self) -> Self {
        self.fail_all_searches = true;
        self
    }

    /// Searches containing `needle` return an error.
    pub fn with_failing_search(mut self, needle: &str) -> Self {
        self.failing_search_needles.push(needle.to_string());
        self
    }

    /// Fetching this PR number returns an error.
    pub fn with_failing_fetch(mut self, number: u64) -> Self {
        self.failing_fetches.insert(number);
        self
    }
}

impl PrLookup for FakeLookup {
    fn search_pr_numbers(&self, query: &str) -> Result<Vec<u64>> {
        if self.fail_all_searches {
            return Err(WardenError::GhError("search unavailable".to_string()));
        }
        if self
            .failing_search_needles
            .iter()
            .any(|needle| query.contains(needle))
        {
            return Err(WardenError::GhError("search unavailable".to_string()));
        }

        let mut numbers = Vec::new();
        for (needle, found) in &self.searches {
            if query.contains(needle) {
                numbers.extend_from_slice(found);
            }
        }
        Ok(numbers)
    }

    fn fetch_pr(&self, _owner: &str, _repo: &str, number: u64) -> Result<PrDetail> {
        if self.failing_fetches.contains(&number) {
            return Err(WardenError::GhError(format!("PR #{} unavailable", number)));
        }
        self.prs
            .get(&number)
            .cloned()
            .ok_or_else(|| WardenError::GhError(format!("PR #{} not found", number)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_mutex_can_be_acquired() {
        let lock = ENV_MUTEX.lock();
        assert!(lock.is_ok());
    }

    #[test]
    fn test_fake_lookup_matches_by_needle() {
        let lookup = FakeLookup::new().with_search("MPT-7", vec![10, 11]);
        let found = lookup.search_pr_numbers("\"MPT-7\" repo:a/b is:pr").unwrap();
        assert_eq!(found, vec![10, 11]);

        let none = lookup.search_pr_numbers("\"MPT-8\" repo:a/b is:pr").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_fake_lookup_fetch_missing_is_error() {
        let lookup = FakeLookup::new();
        assert!(lookup.fetch_pr("a", "b", 99).is_err());
    }
}

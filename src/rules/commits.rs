//! Commit hygiene checks: commit count and merge commit detection.

use regex::Regex;

use crate::pr::Commit;
use crate::rules::Finding;

/// Warn when a PR carries more than one commit.
pub fn check_commit_count(commits: &[Commit]) -> Vec<Finding> {
    let count = commits.len();

    if count > 1 {
        vec![Finding::warning(format!(
            "This PR contains **{} commits**.\n\n\
             Please squash them into a single commit to keep the git history clean and easy to follow.\n\n\
             Multiple commits are acceptable only in the following cases:\n\
             1. One commit is a technical refactoring, and another introduces business logic changes.\n\
             2. You are doing a complex multi-step refactoring (although in this case we still recommend splitting it into separate PRs).",
            count
        ))]
    } else {
        vec![]
    }
}

/// Warn when a PR contains merge commits, listing the offenders.
///
/// A commit counts as a merge when it has more than one parent or its
/// message starts with the word "merge" (case-insensitive). The message
/// heuristic intentionally also catches subjects like "Merge sorted
/// lists properly".
pub fn check_merge_commits(commits: &[Commit]) -> Vec<Finding> {
    if commits.is_empty() {
        return vec![];
    }

    let merge_message = Regex::new(r"(?i)^merge\b").unwrap();
    let offenders: Vec<&Commit> = commits
        .iter()
        .filter(|c| c.is_merge() || merge_message.is_match(&c.message))
        .collect();

    if offenders.is_empty() {
        return vec![];
    }

    let list = offenders
        .iter()
        .map(|c| format!("- {} — {}", c.short_sha(), c.summary()))
        .collect::<Vec<_>>()
        .join("\n");

    vec![Finding::warning(format!(
        "This PR contains {} merge commit(s).\n\
         Please use `git pull --rebase` to keep a clean, linear history.\n\n\
         Offending commits:\n{}",
        offenders.len(),
        list
    ))]
}

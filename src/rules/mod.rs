//! Convention checks for pull requests.
//!
//! Each check inspects an immutable [`PrSnapshot`] (plus the file change
//! set and, for the mainline linkage check, a [`PrLookup`]) and produces
//! zero or more [`Finding`]s. Checks are organized by domain:
//!
//! - [`title`] - Issue key presence in the PR title
//! - [`size`] - Diff size threshold
//! - [`commits`] - Commit count and merge commit detection
//! - [`release`] - Release branch tagging and mainline linkage
//! - [`coverage`] - Test presence and test file mirroring
//!
//! No check can fail the review: remote lookups that error are folded
//! away per item, so [`Evaluator::evaluate`] always returns a plain
//! list of findings.

mod commits;
mod coverage;
mod release;
mod size;
mod title;

use regex::Regex;

use crate::config::RuleConfig;
use crate::pr::{FileChangeSet, PrLookup, PrSnapshot};

/// One piece of review feedback produced by a check.
///
/// Warnings ask the author to change something; infos are confirmations
/// or rendered detail tables. Neither blocks the PR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Warning(String),
    Info(String),
}

impl Finding {
    pub fn warning(text: impl Into<String>) -> Self {
        Finding::Warning(text.into())
    }

    pub fn info(text: impl Into<String>) -> Self {
        Finding::Info(text.into())
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Finding::Warning(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Finding::Warning(text) | Finding::Info(text) => text,
        }
    }
}

/// Runs every check against a pull request snapshot.
///
/// Construction compiles the issue key pattern once from the configured
/// prefix; evaluation is then pure except for the mainline lookups.
pub struct Evaluator {
    config: RuleConfig,
    key_pattern: Regex,
}

impl Evaluator {
    pub fn new(config: RuleConfig) -> Self {
        let pattern = format!(r"\b{}-\d+\b", regex::escape(&config.issue_key_prefix));
        // The prefix is escaped, so the pattern is always valid.
        let key_pattern = Regex::new(&pattern).unwrap();
        Self {
            config,
            key_pattern,
        }
    }

    /// Run all checks in order and collect their findings.
    ///
    /// The order is stable: title, size, commit count, release tag,
    /// test presence, mainline linkage, merge commits, test mirroring.
    pub fn evaluate(
        &self,
        pr: &PrSnapshot,
        files: &FileChangeSet,
        lookup: &dyn PrLookup,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        findings.extend(title::check_issue_key(
            &self.key_pattern,
            &pr.title,
            &self.config,
        ));
        findings.extend(size::check_diff_size(pr, self.config.diff_line_threshold));
        findings.extend(commits::check_commit_count(&pr.commits));
        findings.extend(release::check_release_tag(pr, &self.config));
        findings.extend(coverage::check_test_presence(files));
        findings.extend(release::check_mainline_linkage(
            &self.key_pattern,
            &self.config,
            pr,
            lookup,
        ));
        findings.extend(commits::check_merge_commits(&pr.commits));
        findings.extend(coverage::check_test_mirroring(files));

        findings
    }
}

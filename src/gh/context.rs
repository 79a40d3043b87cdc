//! Working out which PR to review, in CI and locally.

use std::env;
use std::fs;
use std::process::Command;

use serde_json::Value;

use crate::error::{Result, WardenError};
use crate::git;

/// The repository and PR a review run targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewContext {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl ReviewContext {
    /// Build the context from GitHub Actions environment variables.
    ///
    /// The repository comes from `GITHUB_REPOSITORY`. The PR number is
    /// read from the event payload when present, with `GITHUB_REF`
    /// (`refs/pull/<n>/merge`) as a fallback.
    pub fn from_ci_env() -> Result<Self> {
        let repository = env::var("GITHUB_REPOSITORY")
            .map_err(|_| WardenError::MissingEnv("GITHUB_REPOSITORY"))?;
        let (owner, repo) = parse_repository(&repository)?;
        let number = detect_ci_pr_number()?;

        Ok(Self {
            owner,
            repo,
            number,
        })
    }

    /// Build the context for a local run, resolving the repository via
    /// gh and the PR from the current branch unless one is given.
    pub fn detect_local(pr_override: Option<u64>) -> Result<Self> {
        let (owner, repo) = current_repo()?;

        let number = match pr_override {
            Some(number) => number,
            None => {
                let branch = git::current_branch()?;
                pr_number_for_branch(&branch)?.ok_or_else(|| {
                    WardenError::NoPullRequest(format!(
                        "no open PR found for branch '{}'. Use --pr to pick one explicitly",
                        branch
                    ))
                })?
            }
        };

        Ok(Self {
            owner,
            repo,
            number,
        })
    }
}

fn detect_ci_pr_number() -> Result<u64> {
    if let Ok(event_path) = env::var("GITHUB_EVENT_PATH") {
        if let Ok(content) = fs::read_to_string(&event_path) {
            if let Ok(event) = serde_json::from_str::<Value>(&content) {
                if let Some(number) = pr_number_from_event(&event) {
                    return Ok(number);
                }
            }
        }
    }

    if let Ok(github_ref) = env::var("GITHUB_REF") {
        if let Some(number) = pr_number_from_ref(&github_ref) {
            return Ok(number);
        }
    }

    Err(WardenError::NoPullRequest(
        "no PR number in the event payload or GITHUB_REF; \
         run this on a pull_request event"
            .to_string(),
    ))
}

/// Split an `owner/repo` slug.
pub(crate) fn parse_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(WardenError::BadResponse(format!(
            "malformed repository slug '{}', expected owner/repo",
            repository
        ))),
    }
}

/// Pull the PR number out of a webhook event payload.
pub(crate) fn pr_number_from_event(event: &Value) -> Option<u64> {
    event
        .pointer("/pull_request/number")
        .or_else(|| event.pointer("/issue/number"))
        .and_then(|v| v.as_u64())
}

/// Parse a PR number from a `refs/pull/<n>/...` ref.
pub(crate) fn pr_number_from_ref(github_ref: &str) -> Option<u64> {
    let rest = github_ref.strip_prefix("refs/pull/")?;
    let (number, _) = rest.split_once('/')?;
    number.parse().ok()
}

/// Resolve the owner and repo of the checkout via gh.
fn current_repo() -> Result<(String, String)> {
    let output = Command::new("gh")
        .args(["repo", "view", "--json", "nameWithOwner"])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WardenError::GhError(stderr.trim().to_string()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: Value = serde_json::from_str(stdout.trim())?;
    let slug = parsed
        .get("nameWithOwner")
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            WardenError::BadResponse("repo view returned no nameWithOwner".to_string())
        })?;

    parse_repository(slug)
}

/// Find the open PR for a branch, if one exists.
fn pr_number_for_branch(branch: &str) -> Result<Option<u64>> {
    let output = Command::new("gh")
        .args(["pr", "list", "--head", branch, "--json", "number"])
        .output()?;

    if !output.status.success() {
        return Ok(None);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();

    if trimmed == "[]" || trimmed.is_empty() {
        return Ok(None);
    }

    let parsed: std::result::Result<Vec<Value>, _> = serde_json::from_str(trimmed);

    match parsed {
        Ok(prs) if !prs.is_empty() => Ok(prs[0].get("number").and_then(|v| v.as_u64())),
        _ => Ok(None),
    }
}

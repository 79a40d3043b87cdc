//! Fetching and parsing the PR snapshot from the GitHub API.

use serde_json::Value;

use crate::error::Result;
use crate::pr::{Commit, FileChangeSet, PrSnapshot};

use super::api;
use super::context::ReviewContext;

/// Fetch everything the checks need about a PR in three calls:
/// the PR itself, its commits, and its changed files.
pub fn fetch_snapshot(ctx: &ReviewContext) -> Result<(PrSnapshot, FileChangeSet)> {
    let base = format!("repos/{}/{}/pulls/{}", ctx.owner, ctx.repo, ctx.number);

    let pr = api::api_get(&base)?;
    let commits = api::api_get_paged(&format!("{}/commits", base))?;
    let files = api::api_get_paged(&format!("{}/files", base))?;

    let snapshot = snapshot_from_json(&ctx.owner, &ctx.repo, ctx.number, &pr, &commits);
    let change_set = change_set_from_json(&files);

    Ok((snapshot, change_set))
}

/// Assemble a snapshot from raw API responses. Missing fields fall back
/// to empty strings and zeros rather than failing the review.
pub(crate) fn snapshot_from_json(
    owner: &str,
    repo: &str,
    number: u64,
    pr: &Value,
    commits: &[Value],
) -> PrSnapshot {
    PrSnapshot {
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
        title: str_at(pr, "/title"),
        base_branch: str_at(pr, "/base/ref"),
        head_branch: str_at(pr, "/head/ref"),
        html_url: str_at(pr, "/html_url"),
        additions: u64_at(pr, "/additions"),
        deletions: u64_at(pr, "/deletions"),
        changed_files: u64_at(pr, "/changed_files"),
        commits: commits.iter().map(commit_from_json).collect(),
    }
}

fn commit_from_json(value: &Value) -> Commit {
    Commit {
        sha: str_at(value, "/sha"),
        message: str_at(value, "/commit/message"),
        parent_count: value
            .get("parents")
            .and_then(|v| v.as_array())
            .map(|a| a.len())
            .unwrap_or(0),
    }
}

/// Partition the files listing by change status.
///
/// `added` and `removed` map to created and deleted; everything else
/// (modified, renamed, copied, changed) counts as a modification.
pub(crate) fn change_set_from_json(files: &[Value]) -> FileChangeSet {
    let mut created = Vec::new();
    let mut modified = Vec::new();
    let mut deleted = Vec::new();

    for file in files {
        let path = str_at(file, "/filename");
        if path.is_empty() {
            continue;
        }

        match file.get("status").and_then(|v| v.as_str()).unwrap_or("") {
            "added" => created.push(path),
            "removed" => deleted.push(path),
            _ => modified.push(path),
        }
    }

    FileChangeSet::new(created, modified, deleted)
}

fn str_at(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn u64_at(value: &Value, pointer: &str) -> u64 {
    value.pointer(pointer).and_then(|v| v.as_u64()).unwrap_or(0)
}

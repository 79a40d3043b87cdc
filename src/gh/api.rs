//! Thin wrappers around the `gh api` subprocess.

use std::process::Command;

use serde_json::Value;

use crate::error::{Result, WardenError};

/// Page size for paginated endpoints.
const PER_PAGE: usize = 100;

/// Upper bound on pages fetched from any one endpoint.
const MAX_PAGES: usize = 10;

/// Check if the GitHub CLI (gh) is installed and available in PATH
pub fn is_gh_installed() -> bool {
    Command::new("gh")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check if gh has credentials, either from `gh auth login` or a token
/// in the environment.
pub fn is_gh_authenticated() -> bool {
    Command::new("gh")
        .args(["auth", "status"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run gh with the given arguments and return trimmed stdout.
fn run_gh(args: &[&str]) -> Result<String> {
    let output = Command::new("gh").args(args).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WardenError::GhError(stderr.trim().to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// GET a REST endpoint and parse the response as JSON.
pub fn api_get(path: &str) -> Result<Value> {
    let stdout = run_gh(&["api", path])?;
    Ok(serde_json::from_str(&stdout)?)
}

/// GET an array endpoint page by page until a short page, up to a
/// bounded number of pages.
pub fn api_get_paged(path: &str) -> Result<Vec<Value>> {
    let mut items = Vec::new();

    for page in 1..=MAX_PAGES {
        let separator = if path.contains('?') { '&' } else { '?' };
        let paged = format!("{}{}per_page={}&page={}", path, separator, PER_PAGE, page);

        let value = api_get(&paged)?;
        let page_items = value
            .as_array()
            .cloned()
            .ok_or_else(|| WardenError::BadResponse(format!("expected an array from {}", path)))?;

        let count = page_items.len();
        items.extend(page_items);

        if count < PER_PAGE {
            break;
        }
    }

    Ok(items)
}

/// Run a search query against the search API. Single page.
pub fn api_search(query: &str, per_page: usize) -> Result<Value> {
    let q = format!("q={}", query);
    let per = format!("per_page={}", per_page);
    let stdout = run_gh(&["api", "-X", "GET", "search/issues", "-f", &q, "-F", &per])?;
    Ok(serde_json::from_str(&stdout)?)
}

/// POST to a REST endpoint with a single string field.
pub fn api_post(path: &str, field: &str, value: &str) -> Result<Value> {
    let body = format!("{}={}", field, value);
    let stdout = run_gh(&["api", "-X", "POST", path, "-f", &body])?;
    Ok(serde_json::from_str(&stdout)?)
}

/// PATCH a REST endpoint with a single string field.
pub fn api_patch(path: &str, field: &str, value: &str) -> Result<Value> {
    let body = format!("{}={}", field, value);
    let stdout = run_gh(&["api", "-X", "PATCH", path, "-f", &body])?;
    Ok(serde_json::from_str(&stdout)?)
}

//! Production [`PrLookup`] backed by the gh search and pulls endpoints.

use serde_json::Value;

use crate::error::{Result, WardenError};
use crate::pr::{PrDetail, PrLookup};

use super::api;

/// Result page size for mainline searches. One page is enough; a key
/// with dozens of mainline PRs is already linked many times over.
const SEARCH_PAGE_SIZE: usize = 50;

/// PR lookup that shells out to gh.
pub struct GhLookup;

impl PrLookup for GhLookup {
    fn search_pr_numbers(&self, query: &str) -> Result<Vec<u64>> {
        let response = api::api_search(query, SEARCH_PAGE_SIZE)?;
        numbers_from_search(&response)
    }

    fn fetch_pr(&self, owner: &str, repo: &str, number: u64) -> Result<PrDetail> {
        let response = api::api_get(&format!("repos/{}/{}/pulls/{}", owner, repo, number))?;
        Ok(detail_from_json(number, &response))
    }
}

pub(crate) fn numbers_from_search(response: &Value) -> Result<Vec<u64>> {
    let items = response
        .get("items")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            WardenError::BadResponse("search response has no items array".to_string())
        })?;

    Ok(items
        .iter()
        .filter_map(|item| item.get("number").and_then(|v| v.as_u64()))
        .collect())
}

pub(crate) fn detail_from_json(number: u64, value: &Value) -> PrDetail {
    PrDetail {
        number,
        base_branch: value
            .pointer("/base/ref")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        state: value
            .get("state")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        merged: value
            .get("merged")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
        html_url: value
            .get("html_url")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
    }
}

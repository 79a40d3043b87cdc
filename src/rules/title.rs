//! Issue key check on the PR title.

use regex::Regex;

use crate::config::RuleConfig;
use crate::rules::Finding;

/// Extract issue keys from `text` in match order, duplicates included.
pub fn issue_keys(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The title must contain exactly one issue key.
///
/// Zero or multiple keys warn; exactly one produces a confirmation with
/// a tracker link.
pub fn check_issue_key(pattern: &Regex, title: &str, config: &RuleConfig) -> Vec<Finding> {
    let keys = issue_keys(pattern, title);

    match keys.as_slice() {
        [] => vec![Finding::warning(format!(
            "PR title must include exactly one Jira issue key in the format {}-XXXX.",
            config.issue_key_prefix
        ))],
        [key] => vec![Finding::info(format!(
            "✅ Found Jira issue key in the title: [{}]({})",
            key,
            config.tracker_link(key)
        ))],
        many => vec![Finding::warning(format!(
            "PR title contains multiple Jira issue keys: {}. Please keep only one.",
            many.join(", ")
        ))],
    }
}

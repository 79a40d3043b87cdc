//! Release branch checks: required title tags and mainline linkage.

use std::collections::HashSet;

use regex::Regex;

use crate::config::RuleConfig;
use crate::pr::{MainlinePrLink, PrLookup, PrSnapshot, PrStatus};
use crate::rules::{title, Finding};

/// PRs targeting branches with this prefix get the release checks.
pub const RELEASE_BRANCH_PREFIX: &str = "release/";

/// The branch every release change must also land on.
pub const MAINLINE_BRANCH: &str = "main";

/// PRs into a release branch must carry an `[HF]` or `[Backport]` tag
/// in the title (case-insensitive).
pub fn check_release_tag(pr: &PrSnapshot, config: &RuleConfig) -> Vec<Finding> {
    if !pr.base_branch.starts_with(RELEASE_BRANCH_PREFIX) {
        return vec![];
    }

    let tag = Regex::new(r"(?i)\[(HF|Backport)\]").unwrap();
    if tag.is_match(&pr.title) {
        return vec![];
    }

    vec![Finding::warning(format!(
        "PRs targeting a release branch (**{}**) must include [HF] or [Backport] in the title.\n\n\
         Example: `[HF] {}-1234 Fix crash on startup` or `[Backport] {}-1234 Update dependency versions`.",
        pr.base_branch, config.issue_key_prefix, config.issue_key_prefix
    ))]
}

/// Every issue key on a release PR must have a corresponding open or
/// merged PR targeting the mainline branch.
///
/// One warning per unlinked key, plus a summary table covering every
/// key that could be checked. Keys whose searches all fail are skipped
/// rather than reported as unlinked.
pub fn check_mainline_linkage(
    pattern: &Regex,
    config: &RuleConfig,
    pr: &PrSnapshot,
    lookup: &dyn PrLookup,
) -> Vec<Finding> {
    if !pr.base_branch.starts_with(RELEASE_BRANCH_PREFIX) {
        return vec![];
    }

    let mut keys = title::issue_keys(pattern, &pr.title);
    let mut seen = HashSet::new();
    keys.retain(|key| seen.insert(key.clone()));

    if keys.is_empty() {
        return vec![Finding::warning(format!(
            "This PR targets **{}**, but its title does not include a Jira issue key (expected format: {}-XXXX).",
            pr.base_branch, config.issue_key_prefix
        ))];
    }

    let mut findings = Vec::new();
    let mut rows: Vec<[String; 3]> = Vec::new();

    for key in &keys {
        let jira_link = format!("[{}]({})", key, config.tracker_link(key));

        let links = match mainline_links(key, pr, lookup) {
            Some(links) => links,
            // Every search for this key failed; skip it rather than
            // claim the link is missing.
            None => continue,
        };

        if links.is_empty() {
            findings.push(Finding::warning(format!(
                "No PR to **{}** found for Jira issue {}. \
                 Please create (or reference) a mainline PR for this change, or ensure it has already been merged.",
                MAINLINE_BRANCH, jira_link
            )));
            rows.push([jira_link, "—".to_string(), "not found".to_string()]);
        } else {
            let list = links
                .iter()
                .map(|link| format!("[{}]({}) ({})", link.number, link.html_url, link.status))
                .collect::<Vec<_>>()
                .join(", ");
            rows.push([jira_link, list, "ok".to_string()]);
        }
    }

    if !rows.is_empty() {
        findings.push(Finding::info(render_linkage_table(&rows)));
    }

    findings
}

/// Find open or merged PRs to the mainline branch mentioning `key`.
///
/// Returns `None` when no search succeeded. Individual fetch failures
/// and PRs whose base turns out not to be the mainline are dropped.
fn mainline_links(key: &str, pr: &PrSnapshot, lookup: &dyn PrLookup) -> Option<Vec<MainlinePrLink>> {
    let base_query = format!(
        "\"{}\" repo:{}/{} is:pr base:{}",
        key, pr.owner, pr.repo, MAINLINE_BRANCH
    );

    let mut numbers = Vec::new();
    let mut seen = HashSet::new();
    let mut any_search_ok = false;

    for state in ["is:open", "is:closed"] {
        if let Ok(found) = lookup.search_pr_numbers(&format!("{} {}", base_query, state)) {
            any_search_ok = true;
            for number in found {
                if seen.insert(number) {
                    numbers.push(number);
                }
            }
        }
    }

    if !any_search_ok {
        return None;
    }

    let links = numbers
        .into_iter()
        .filter_map(|number| lookup.fetch_pr(&pr.owner, &pr.repo, number).ok())
        .filter(|detail| detail.base_branch == MAINLINE_BRANCH)
        .map(|detail| MainlinePrLink {
            number: detail.number,
            status: detail.status(),
            html_url: detail.html_url,
        })
        .filter(|link| matches!(link.status, PrStatus::Open | PrStatus::Merged))
        .collect();

    Some(links)
}

fn render_linkage_table(rows: &[[String; 3]]) -> String {
    let mut lines = vec![
        "| Jira issue | PRs to main (open/merged) | Status |".to_string(),
        "|---|---|---|".to_string(),
    ];
    lines.extend(
        rows.iter()
            .map(|row| format!("| {} | {} | {} |", row[0], row[1], row[2])),
    );
    format!("### Release → Main linkage check\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{pr_detail, snapshot, FakeLookup};

    fn key_pattern() -> Regex {
        Regex::new(r"\bMPT-\d+\b").unwrap()
    }

    fn linkage(pr: &PrSnapshot, lookup: &FakeLookup) -> Vec<Finding> {
        check_mainline_linkage(&key_pattern(), &RuleConfig::default(), pr, lookup)
    }

    // ------------------------------------------------------------------
    // Release tag
    // ------------------------------------------------------------------

    #[test]
    fn test_tag_not_required_outside_release_branches() {
        let pr = snapshot("MPT-1 Plain change", "main");
        assert!(check_release_tag(&pr, &RuleConfig::default()).is_empty());

        let pr = snapshot("MPT-1 Plain change", "develop");
        assert!(check_release_tag(&pr, &RuleConfig::default()).is_empty());
    }

    #[test]
    fn test_release_pr_without_tag_warns() {
        let pr = snapshot("MPT-1 Fix crash", "release/3.2");
        let findings = check_release_tag(&pr, &RuleConfig::default());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_warning());
        assert!(findings[0].text().contains("**release/3.2**"));
        assert!(findings[0].text().contains("[HF] or [Backport]"));
        assert!(findings[0].text().contains("`[HF] MPT-1234 Fix crash on startup`"));
    }

    #[test]
    fn test_hf_tag_accepted() {
        let pr = snapshot("[HF] MPT-1 Fix crash", "release/3.2");
        assert!(check_release_tag(&pr, &RuleConfig::default()).is_empty());
    }

    #[test]
    fn test_backport_tag_accepted() {
        let pr = snapshot("MPT-1 [Backport] Bump versions", "release/3.2");
        assert!(check_release_tag(&pr, &RuleConfig::default()).is_empty());
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let pr = snapshot("[hf] MPT-1 Fix", "release/3.2");
        assert!(check_release_tag(&pr, &RuleConfig::default()).is_empty());

        let pr = snapshot("[BACKPORT] MPT-1 Fix", "release/3.2");
        assert!(check_release_tag(&pr, &RuleConfig::default()).is_empty());
    }

    #[test]
    fn test_tag_requires_brackets() {
        let pr = snapshot("HF MPT-1 Fix crash", "release/3.2");
        assert_eq!(check_release_tag(&pr, &RuleConfig::default()).len(), 1);
    }

    #[test]
    fn test_release_prefix_must_match_exactly() {
        // "released/..." is not a release branch.
        let pr = snapshot("MPT-1 Fix", "released/3.2");
        assert!(check_release_tag(&pr, &RuleConfig::default()).is_empty());
    }

    // ------------------------------------------------------------------
    // Mainline linkage
    // ------------------------------------------------------------------

    #[test]
    fn test_linkage_skipped_outside_release_branches() {
        let pr = snapshot("MPT-1 Change", "main");
        let findings = linkage(&pr, &FakeLookup::new());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_release_pr_without_key_warns_and_renders_no_table() {
        let pr = snapshot("[HF] Fix crash without a key", "release/3.2");
        let findings = linkage(&pr, &FakeLookup::new());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_warning());
        assert!(findings[0].text().contains("**release/3.2**"));
        assert!(findings[0].text().contains("expected format: MPT-XXXX"));
    }

    #[test]
    fn test_linked_merged_pr_renders_ok_row() {
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![120])
            .with_pr(pr_detail(120, "main", "closed", true));

        let findings = linkage(&pr, &lookup);
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].is_warning());

        let table = findings[0].text();
        assert!(table.starts_with("### Release → Main linkage check"));
        assert!(table.contains("| Jira issue | PRs to main (open/merged) | Status |"));
        assert!(table.contains("[MPT-9](https://example.atlassian.net/browse/MPT-9)"));
        assert!(table.contains("(merged)"));
        assert!(table.contains("| ok |"));
    }

    #[test]
    fn test_open_pr_counts_as_linked() {
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![7])
            .with_pr(pr_detail(7, "main", "open", false));

        let findings = linkage(&pr, &lookup);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].text().contains("(open)"));
    }

    #[test]
    fn test_no_results_warns_not_found() {
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let findings = linkage(&pr, &FakeLookup::new());

        assert_eq!(findings.len(), 2);
        assert!(findings[0].is_warning());
        assert!(findings[0].text().contains("No PR to **main** found"));
        assert!(findings[0]
            .text()
            .contains("[MPT-9](https://example.atlassian.net/browse/MPT-9)"));

        let table = findings[1].text();
        assert!(table.contains("| — | not found |"));
    }

    #[test]
    fn test_closed_unmerged_pr_does_not_count() {
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![5])
            .with_pr(pr_detail(5, "main", "closed", false));

        let findings = linkage(&pr, &lookup);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].text().contains("No PR to **main** found"));
    }

    #[test]
    fn test_wrong_base_branch_does_not_count() {
        // Search hits can target other branches; only true mainline PRs count.
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![5])
            .with_pr(pr_detail(5, "develop", "open", false));

        let findings = linkage(&pr, &lookup);
        assert!(findings[0].text().contains("No PR to **main** found"));
    }

    #[test]
    fn test_fetch_failure_treated_as_missing_link() {
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![5])
            .with_failing_fetch(5);

        let findings = linkage(&pr, &lookup);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].text().contains("No PR to **main** found"));
    }

    #[test]
    fn test_duplicate_numbers_across_searches_fetch_once() {
        // The same PR shows up in both the open and closed searches;
        // the row must list it once.
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![120])
            .with_pr(pr_detail(120, "main", "open", false));

        let findings = linkage(&pr, &lookup);
        let table = findings[0].text();
        assert_eq!(table.matches("[120]").count(), 1);
    }

    #[test]
    fn test_failed_searches_skip_key_entirely() {
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new().failing_searches();

        let findings = linkage(&pr, &lookup);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_one_failing_key_does_not_poison_others() {
        let pr = snapshot("[HF] MPT-1 and MPT-2 combined fix", "release/3.2");
        let lookup = FakeLookup::new()
            .with_failing_search("\"MPT-1\"")
            .with_search("\"MPT-2\"", vec![30])
            .with_pr(pr_detail(30, "main", "closed", true));

        let findings = linkage(&pr, &lookup);
        // MPT-1 is skipped; MPT-2 still gets its row.
        assert_eq!(findings.len(), 1);
        let table = findings[0].text();
        assert!(table.contains("[MPT-2]"));
        assert!(!table.contains("[MPT-1]"));
    }

    #[test]
    fn test_multiple_keys_share_one_table() {
        let pr = snapshot("[Backport] MPT-1 MPT-2 Combined", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-1\"", vec![10])
            .with_pr(pr_detail(10, "main", "closed", true))
            .with_search("\"MPT-2\"", vec![]);

        let findings = linkage(&pr, &lookup);
        // One warning for MPT-2, one table with both rows.
        assert_eq!(findings.len(), 2);
        assert!(findings[0].is_warning());
        assert!(findings[0].text().contains("MPT-2"));

        let table = findings[1].text();
        assert!(table.contains("[MPT-1]"));
        assert!(table.contains("| ok |"));
        assert!(table.contains("| — | not found |"));
    }

    #[test]
    fn test_repeated_key_in_title_checked_once() {
        let pr = snapshot("[HF] MPT-9 revisit MPT-9", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![120])
            .with_pr(pr_detail(120, "main", "open", false));

        let findings = linkage(&pr, &lookup);
        assert_eq!(findings.len(), 1);
        let table = findings[0].text();
        // One row, not two.
        assert_eq!(table.matches("[MPT-9](https://example").count(), 1);
    }

    #[test]
    fn test_multiple_links_joined_in_one_row() {
        let pr = snapshot("[HF] MPT-9 Fix crash", "release/3.2");
        let lookup = FakeLookup::new()
            .with_search("\"MPT-9\"", vec![10, 11])
            .with_pr(pr_detail(10, "main", "open", false))
            .with_pr(pr_detail(11, "main", "closed", true));

        let findings = linkage(&pr, &lookup);
        assert_eq!(findings.len(), 1);
        let table = findings[0].text();
        assert!(table.contains("(open), "));
        assert!(table.contains("(merged)"));
    }
}

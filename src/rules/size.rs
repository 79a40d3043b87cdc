//! Diff size check.

use crate::pr::PrSnapshot;
use crate::rules::Finding;

/// Warn when additions + deletions exceed the configured threshold.
///
/// Exactly at the threshold is fine.
pub fn check_diff_size(pr: &PrSnapshot, threshold: u64) -> Vec<Finding> {
    let total = pr.total_lines();

    if total > threshold {
        vec![Finding::warning(format!(
            "This PR changes **{}** lines across **{}** files (threshold: {}). \
             Please consider splitting it into smaller PRs for easier review.",
            total, pr.changed_files, threshold
        ))]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::snapshot;

    fn sized(additions: u64, deletions: u64, changed_files: u64) -> PrSnapshot {
        let mut pr = snapshot("MPT-1 Title", "main");
        pr.additions = additions;
        pr.deletions = deletions;
        pr.changed_files = changed_files;
        pr
    }

    #[test]
    fn test_under_threshold_is_silent() {
        assert!(check_diff_size(&sized(100, 50, 3), 600).is_empty());
    }

    #[test]
    fn test_exactly_at_threshold_is_silent() {
        assert!(check_diff_size(&sized(400, 200, 8), 600).is_empty());
    }

    #[test]
    fn test_one_over_threshold_warns() {
        let findings = check_diff_size(&sized(400, 201, 8), 600);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_warning());
        assert!(findings[0].text().contains("**601** lines across **8** files"));
        assert!(findings[0].text().contains("threshold: 600"));
    }

    #[test]
    fn test_custom_threshold() {
        assert!(check_diff_size(&sized(90, 10, 2), 100).is_empty());
        assert_eq!(check_diff_size(&sized(90, 11, 2), 100).len(), 1);
    }

    #[test]
    fn test_deletions_count_toward_total() {
        let findings = check_diff_size(&sized(0, 601, 1), 600);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].text().contains("**601**"));
    }
}

//! Rendering of findings into the sticky review comment.
//!
//! The comment carries a hidden HTML marker so later runs can find and
//! update it instead of stacking new comments on the PR.

use chrono::{DateTime, Utc};

use crate::rules::Finding;

/// Hidden marker identifying the comment managed by this tool.
pub const COMMENT_MARKER: &str = "<!-- prwarden-report -->";

/// Whether a comment body belongs to this tool.
pub fn has_marker(body: &str) -> bool {
    body.contains(COMMENT_MARKER)
}

/// Render the full review comment for a set of findings.
///
/// An empty set renders the all-clear body, used to overwrite a stale
/// report once every warning has been addressed.
pub fn render_report(findings: &[Finding]) -> String {
    render_report_at(findings, Utc::now())
}

fn render_report_at(findings: &[Finding], now: DateTime<Utc>) -> String {
    let mut body = String::new();
    body.push_str(COMMENT_MARKER);
    body.push_str("\n## prwarden review\n\n");

    if findings.is_empty() {
        body.push_str("✅ All checks passed. Nothing to flag on this pull request.\n");
    } else {
        let warnings: Vec<&Finding> = findings.iter().filter(|f| f.is_warning()).collect();
        let infos: Vec<&Finding> = findings.iter().filter(|f| !f.is_warning()).collect();

        if !warnings.is_empty() {
            body.push_str(&format!(
                "**{} warning(s)** need attention.\n\n### Warnings\n\n",
                warnings.len()
            ));
            for warning in &warnings {
                body.push_str("⚠️ ");
                body.push_str(warning.text());
                body.push_str("\n\n");
            }
        }

        for info in &infos {
            body.push_str(info.text());
            body.push_str("\n\n");
        }
    }

    body.push_str(&format!(
        "\n---\n_Last updated: {} by prwarden_\n",
        now.format("%Y-%m-%d %H:%M UTC")
    ));

    body
}

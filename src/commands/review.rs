//! Local review command handler.
//!
//! Lets an author run the same checks CI runs, from their checkout,
//! before pushing the PR through review. Findings print to the
//! terminal; posting the comment is opt-in.

use std::path::Path;

use crate::error::{Result, WardenError};
use crate::gh::{self, GhLookup, ReviewContext};
use crate::git;
use crate::output;
use crate::report;
use crate::rules::Evaluator;

use super::{load_rules, preflight, publish_report};

/// Review a PR from a local checkout.
///
/// Without `--pr`, the PR is detected from the current branch.
pub fn review_command(
    pr: Option<u64>,
    rules: Option<&Path>,
    comment: bool,
    verbose: bool,
) -> Result<()> {
    preflight()?;

    if pr.is_none() && !git::is_git_repo() {
        return Err(WardenError::GitError(
            "not inside a git repository; use --pr to pick a pull request".to_string(),
        ));
    }

    let config = load_rules(rules)?;
    let ctx = ReviewContext::detect_local(pr)?;

    let (snapshot, files) = gh::fetch_snapshot(&ctx)?;
    output::print_reviewing(&ctx.owner, &ctx.repo, ctx.number, &snapshot.title);

    let evaluator = Evaluator::new(config);
    let findings = evaluator.evaluate(&snapshot, &files, &GhLookup);

    output::print_findings(&findings);
    let warnings = findings.iter().filter(|f| f.is_warning()).count();
    output::print_summary(warnings, findings.len() - warnings);

    if verbose {
        output::print_report_preview(&report::render_report(&findings));
    }

    if comment {
        match publish_report(&ctx, &findings)? {
            Some(action) => output::print_comment_posted(action),
            None => output::print_comment_skipped(),
        }
    } else {
        output::print_info("Run with --comment to post this as a review comment.");
    }

    if warnings == 0 {
        output::print_all_clear();
    }

    Ok(())
}

//! CI review command handler.
//!
//! Runs inside a GitHub Actions job: resolves the PR from the job
//! environment, evaluates the checks, and syncs the sticky comment.
//! Warnings never fail the job; only setup problems produce a non-zero
//! exit.

use std::path::Path;

use crate::error::Result;
use crate::gh::{self, GhLookup, ReviewContext};
use crate::output;
use crate::report;
use crate::rules::Evaluator;

use super::{load_rules, preflight, publish_report};

/// Review the PR this CI job belongs to.
pub fn ci_command(rules: Option<&Path>, dry_run: bool, verbose: bool) -> Result<()> {
    preflight()?;

    let config = load_rules(rules)?;
    let ctx = ReviewContext::from_ci_env()?;

    let (snapshot, files) = gh::fetch_snapshot(&ctx)?;
    output::print_reviewing(&ctx.owner, &ctx.repo, ctx.number, &snapshot.title);

    let evaluator = Evaluator::new(config);
    let findings = evaluator.evaluate(&snapshot, &files, &GhLookup);

    output::print_findings(&findings);
    let warnings = findings.iter().filter(|f| f.is_warning()).count();
    output::print_summary(warnings, findings.len() - warnings);

    if dry_run || verbose {
        output::print_report_preview(&report::render_report(&findings));
    }

    if dry_run {
        output::print_info("Dry run; not posting the review comment.");
        return Ok(());
    }

    match publish_report(&ctx, &findings)? {
        Some(action) => output::print_comment_posted(action),
        None => output::print_comment_skipped(),
    }

    if warnings == 0 {
        output::print_all_clear();
    }

    Ok(())
}

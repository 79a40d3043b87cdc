//! CLI command handlers for prwarden.
//!
//! This module contains the implementation of all CLI subcommands.
//! Each command has its own module with handler functions.
//!
//! # Commands
//!
//! - [`ci`] - Review the PR of the current CI job and post the report
//! - [`review`] - Review a PR from a local checkout
//! - [`init`] - Write a starter rules file and install completions

mod ci;
mod init;
mod review;

pub use ci::ci_command;
pub use init::init_command;
pub use review::review_command;

use std::path::Path;

use crate::config::{RuleConfig, DEFAULT_RULES_FILE};
use crate::error::{Result, WardenError};
use crate::gh::{self, CommentAction, ReviewContext};
use crate::report;
use crate::rules::Finding;

/// Check that gh is usable before any review work.
fn preflight() -> Result<()> {
    if !gh::is_gh_installed() {
        return Err(WardenError::GhNotInstalled);
    }
    if !gh::is_gh_authenticated() {
        return Err(WardenError::GhNotAuthenticated);
    }
    Ok(())
}

/// Load rules from an explicit path (which must exist) or from the
/// default location (which may be absent).
fn load_rules(rules: Option<&Path>) -> Result<RuleConfig> {
    match rules {
        Some(path) => RuleConfig::load(path),
        None => RuleConfig::load_or_default(Path::new(DEFAULT_RULES_FILE)),
    }
}

/// Render the findings and sync the sticky review comment.
///
/// With findings, the report comment is created or updated in place.
/// Without findings, an existing report is rewritten to the all-clear
/// body; when there is no report comment, nothing is posted at all.
fn publish_report(ctx: &ReviewContext, findings: &[Finding]) -> Result<Option<CommentAction>> {
    if findings.is_empty() {
        return match gh::find_report_comment(ctx)? {
            Some(comment_id) => {
                gh::update_comment(ctx, comment_id, &report::render_report(&[]))?;
                Ok(Some(CommentAction::Updated))
            }
            None => Ok(None),
        };
    }

    let body = report::render_report(findings);
    Ok(Some(gh::upsert_report(ctx, &body)?))
}

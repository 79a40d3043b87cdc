//! Review flow output.
//!
//! Headers, per-finding lines, and comment status for the ci and
//! review commands.

use crate::gh::CommentAction;
use crate::rules::Finding;

use super::colors::*;

/// Print the prwarden header banner.
pub fn print_header() {
    println!("{CYAN}{BOLD}");
    println!("+---------------------------------------------+");
    println!("|  prwarden v{:<32}|", env!("CARGO_PKG_VERSION"));
    println!("+---------------------------------------------+");
    println!("{RESET}");
}

/// Print which PR is being reviewed.
pub fn print_reviewing(owner: &str, repo: &str, number: u64, title: &str) {
    println!(
        "{BLUE}Reviewing:{RESET} {}/{}#{} {BOLD}{}{RESET}",
        owner, repo, number, title
    );
    println!();
}

/// Print one line per finding. Multi-line findings show their first line.
pub fn print_findings(findings: &[Finding]) {
    for finding in findings {
        let first_line = finding.text().lines().next().unwrap_or("");
        match finding {
            Finding::Warning(_) => println!("  {YELLOW}warn{RESET}  {}", first_line),
            Finding::Info(_) => println!("  {GRAY}info{RESET}  {}", first_line),
        }
    }
}

/// Print the finding counts after a run.
pub fn print_summary(warnings: usize, infos: usize) {
    println!();
    if warnings > 0 {
        println!(
            "{YELLOW}{BOLD}{} warning(s){RESET}, {} info item(s)",
            warnings, infos
        );
    } else {
        println!("{GREEN}No warnings{RESET}, {} info item(s)", infos);
    }
}

/// Print the all-clear line for a PR with no warnings.
pub fn print_all_clear() {
    println!("{GREEN}{BOLD}All checks passed.{RESET}");
}

/// Print the outcome of the comment upsert.
pub fn print_comment_posted(action: CommentAction) {
    match action {
        CommentAction::Created => println!("{GREEN}Review comment posted.{RESET}"),
        CommentAction::Updated => println!("{GREEN}Review comment updated.{RESET}"),
    }
}

/// Print when there is nothing to post and no stale comment to refresh.
pub fn print_comment_skipped() {
    println!("{GRAY}No findings and no existing report comment; nothing to post.{RESET}");
}

/// Print the full rendered comment body (dry runs and verbose mode).
pub fn print_report_preview(body: &str) {
    println!("{GRAY}{}{RESET}", "-".repeat(45));
    for line in body.lines() {
        println!("{GRAY}{}{RESET}", line);
    }
    println!("{GRAY}{}{RESET}", "-".repeat(45));
}

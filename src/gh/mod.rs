//! GitHub CLI integration.
//!
//! Everything that talks to GitHub goes through the `gh` binary, so the
//! tool inherits gh's authentication (token env vars or `gh auth login`)
//! and never handles credentials itself.
//!
//! # Modules
//!
//! - [`api`] - Subprocess wrappers around `gh api`
//! - [`context`] - Resolving which PR to review (CI env or local branch)
//! - [`snapshot`] - Fetching and parsing the PR snapshot
//! - [`lookup`] - Search and fetch backend for the mainline linkage check
//! - [`comment`] - Sticky review comment management

mod api;
mod comment;
mod context;
mod lookup;
mod snapshot;

pub use api::{is_gh_authenticated, is_gh_installed};
pub use comment::{
    create_comment, find_report_comment, update_comment, upsert_report, CommentAction,
};
pub use context::ReviewContext;
pub use lookup::GhLookup;
pub use snapshot::fetch_snapshot;

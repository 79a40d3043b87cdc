//! Terminal output formatting for prwarden.
//!
//! This module provides consistent, colored terminal output for all
//! CLI operations. Functions are organized by domain:
//!
//! - [`messages`] - Error, info, and success messages
//! - [`review`] - Review flow output (headers, findings, comment status)

pub mod messages;
pub mod review;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

// Re-export colors at module level for convenience
pub use colors::*;

pub use messages::{print_error, print_info, print_success};
pub use review::{
    print_all_clear, print_comment_posted, print_comment_skipped, print_findings, print_header,
    print_report_preview, print_reviewing, print_summary,
};

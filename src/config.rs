use crate::error::{Result, WardenError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default rules file name, looked up in the working directory.
pub const DEFAULT_RULES_FILE: &str = "prwarden.toml";

// ============================================================================
// Rule Configuration
// ============================================================================

/// Tunable knobs for the convention checks.
///
/// Loaded from a TOML rules file. Missing fields fall back to defaults,
/// so a partial file (or no file at all) is fine.
///
/// # Example
///
/// ```toml
/// # Issue tracker key prefix expected in PR titles
/// issue_key_prefix = "MPT"
///
/// # Base URL issue keys are linked to in review comments
/// tracker_base_url = "https://example.atlassian.net/browse"
///
/// # Warn when additions + deletions exceed this many lines
/// diff_line_threshold = 600
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Issue tracker project prefix (the `MPT` in `MPT-1234`).
    #[serde(default = "default_issue_key_prefix")]
    pub issue_key_prefix: String,

    /// Base URL for issue links in review comments.
    #[serde(default = "default_tracker_base_url")]
    pub tracker_base_url: String,

    /// Warn when a PR changes more than this many lines in total.
    #[serde(default = "default_diff_line_threshold")]
    pub diff_line_threshold: u64,
}

fn default_issue_key_prefix() -> String {
    "MPT".to_string()
}

fn default_tracker_base_url() -> String {
    "https://example.atlassian.net/browse".to_string()
}

fn default_diff_line_threshold() -> u64 {
    600
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            issue_key_prefix: default_issue_key_prefix(),
            tracker_base_url: default_tracker_base_url(),
            diff_line_threshold: default_diff_line_threshold(),
        }
    }
}

impl RuleConfig {
    /// Load rules from a TOML file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(WardenError::RulesNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| WardenError::InvalidRules(format!("{}: {}", path.display(), e)))
    }

    /// Load rules from a TOML file, or fall back to defaults when the
    /// file does not exist. A file that exists but fails to parse is
    /// still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Build a tracker URL for an issue key.
    pub fn tracker_link(&self, key: &str) -> String {
        format!("{}/{}", self.tracker_base_url.trim_end_matches('/'), key)
    }
}

// ============================================================================
// Rules File Management
// ============================================================================

/// Default rules file content with explanatory comments.
///
/// Written by `prwarden init` so users can see every knob without
/// reading documentation.
const DEFAULT_RULES_WITH_COMMENTS: &str = r#"# prwarden rules
# Tunable knobs for the pull request convention checks.
# Any omitted setting falls back to its default.

# Issue tracker project prefix expected in PR titles.
# Titles must contain exactly one key in the form <prefix>-<digits>,
# e.g. "MPT-1234 Fix crash on startup".
issue_key_prefix = "MPT"

# Base URL used to link issue keys in review comments.
# The key is appended as a path segment: <base>/<prefix>-1234
tracker_base_url = "https://example.atlassian.net/browse"

# Warn when a PR changes more than this many lines
# (additions + deletions combined).
diff_line_threshold = 600
"#;

/// Write the default rules file with comments to `path`.
///
/// Refuses to overwrite an existing file.
pub fn write_default_rules(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    fs::write(path, DEFAULT_RULES_WITH_COMMENTS)?;
    Ok(true)
}

//! Setup plumbing for the `prwarden-action` binary.
//!
//! The GitHub Action entry point does no review work itself. It resolves
//! the central rules file, makes sure the `prwarden` binary is present
//! (installing it with cargo when it is not), and spawns `prwarden ci`
//! with the API token forwarded through the environment. The child's
//! exit code becomes the action's exit code.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, WardenError};

/// Rules file shipped next to the action binary.
pub const RULES_FILE_NAME: &str = "rules.toml";

/// The review binary the launcher spawns.
pub const REVIEW_BIN: &str = "prwarden";

/// Read the API token from the action input environment.
///
/// GitHub sets `INPUT_TOKEN` to an empty string when the input is
/// absent, so an empty value counts as missing.
pub fn require_token() -> Result<String> {
    match std::env::var("INPUT_TOKEN") {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(WardenError::MissingEnv("INPUT_TOKEN")),
    }
}

/// Resolve the rules file the review runs against.
///
/// `INPUT_RULES` overrides the location; otherwise the file is expected
/// next to the launcher executable, where the action checkout puts it.
pub fn resolve_rules_path() -> Result<PathBuf> {
    let path = match std::env::var("INPUT_RULES") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => default_rules_path()?,
    };

    if !path.exists() {
        return Err(WardenError::RulesNotFound(path));
    }
    Ok(path)
}

fn default_rules_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(dir.join(RULES_FILE_NAME))
}

/// Check if a binary is available in PATH.
pub fn is_installed(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Install the review binary with cargo, streaming the installer's
/// output to the job log.
///
/// Returns the installer's exit code; failing to start cargo at all is
/// an error.
pub fn install_review_tool() -> Result<i32> {
    let status = Command::new("cargo")
        .args(["install", "prwarden-cli", "--locked"])
        .status()
        .map_err(|e| WardenError::InstallFailed(format!("could not run cargo: {}", e)))?;

    Ok(status.code().unwrap_or(1))
}

/// Spawn `prwarden ci --rules <path>` and wait for it.
///
/// The token is exported as both `GITHUB_TOKEN` and `GH_TOKEN` so the
/// gh CLI inside the review picks it up. Output streams straight
/// through to the job log. Runs in `GITHUB_WORKSPACE` when set.
/// Returns the child's exit code (1 when it was killed by a signal).
pub fn run_review(rules: &Path, token: &str) -> Result<i32> {
    let mut command = Command::new(REVIEW_BIN);
    command
        .args(["ci", "--rules"])
        .arg(rules)
        .env("GITHUB_TOKEN", token)
        .env("GH_TOKEN", token);

    if let Ok(workspace) = std::env::var("GITHUB_WORKSPACE") {
        if !workspace.trim().is_empty() {
            command.current_dir(workspace);
        }
    }

    let status = command.status()?;
    Ok(status.code().unwrap_or(1))
}

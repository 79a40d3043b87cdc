use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WardenError {
    #[error("Rules file not found: {0}")]
    RulesNotFound(PathBuf),

    #[error("Invalid rules file: {0}")]
    InvalidRules(String),

    #[error("GitHub CLI (gh) not installed. Install from https://cli.github.com")]
    GhNotInstalled,

    #[error("Not authenticated with GitHub. Set GITHUB_TOKEN or run 'gh auth login' first")]
    GhNotAuthenticated,

    #[error("gh command failed: {0}")]
    GhError(String),

    #[error("Unexpected GitHub API response: {0}")]
    BadResponse(String),

    #[error("Could not determine which pull request to review: {0}")]
    NoPullRequest(String),

    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Failed to install review tool: {0}")]
    InstallFailed(String),

    #[error("Git error: {0}")]
    GitError(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WardenError>;

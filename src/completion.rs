//! Shell completion infrastructure for prwarden.
//!
//! This module provides:
//! - Shell detection from the `$SHELL` environment variable
//! - Completion script generation for bash, zsh, and fish
//! - Installation path resolution for each shell type

use crate::error::{Result, WardenError};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;
use std::path::PathBuf;

/// Shells we can generate completions for.
pub const SUPPORTED_SHELLS: &[&str] = &["bash", "zsh", "fish"];

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    /// Get the display name of the shell.
    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }

    /// Parse a shell name as given on the command line.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "bash" => Ok(ShellType::Bash),
            "zsh" => Ok(ShellType::Zsh),
            "fish" => Ok(ShellType::Fish),
            _ => Err(WardenError::ShellCompletion(format!(
                "Unsupported shell: '{}'",
                name
            ))),
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        WardenError::ShellCompletion(
            "$SHELL environment variable is not set. \
             Please specify your shell manually or set the $SHELL variable."
                .to_string(),
        )
    })?;

    parse_shell_from_path(&shell_path)
}

/// Parse a shell type from a shell path.
///
/// Extracts the basename from the path (e.g. `/bin/zsh`) and matches
/// against supported shells.
pub fn parse_shell_from_path(shell_path: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell_path);

    match ShellType::from_name(shell_name) {
        Ok(shell) => Ok(shell),
        Err(_) => Err(WardenError::ShellCompletion(format!(
            "Unsupported shell: '{}'. \
             Supported shells are: bash, zsh, fish.",
            shell_name
        ))),
    }
}

/// Get the installation path for completion scripts.
///
/// - **Bash**: `~/.local/share/bash-completion/completions/prwarden`,
///   falling back to `~/.bash_completion.d/prwarden`
/// - **Zsh**: `~/.zfunc/_prwarden`
/// - **Fish**: `~/.config/fish/completions/prwarden.fish`
pub fn get_completion_path(shell: ShellType) -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        WardenError::ShellCompletion("Could not determine home directory".to_string())
    })?;

    let path = match shell {
        ShellType::Bash => {
            let xdg_path = home.join(".local/share/bash-completion/completions");
            if xdg_path.exists() {
                xdg_path.join("prwarden")
            } else {
                home.join(".bash_completion.d/prwarden")
            }
        }
        ShellType::Zsh => home.join(".zfunc/_prwarden"),
        ShellType::Fish => home.join(".config/fish/completions/prwarden.fish"),
    };

    Ok(path)
}

/// Ensure the parent directory for a completion script exists.
pub fn ensure_completion_dir(path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WardenError::ShellCompletion(format!(
                    "Failed to create completion directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Build the clap Command structure for completion generation.
///
/// This mirrors the CLI defined in `main.rs` so clap_complete can
/// generate accurate completion scripts.
fn build_cli() -> Command {
    Command::new("prwarden")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Advisory pull request convention checks")
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print the full rendered review comment")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("ci")
                .about("Review the PR of the current CI job and post the report comment")
                .arg(
                    clap::Arg::new("rules")
                        .long("rules")
                        .help("Path to the rules TOML file")
                        .value_hint(clap::ValueHint::FilePath),
                )
                .arg(
                    clap::Arg::new("dry-run")
                        .long("dry-run")
                        .help("Evaluate and print, but do not post the comment")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("review")
                .about("Review a PR from a local checkout")
                .arg(
                    clap::Arg::new("pr")
                        .long("pr")
                        .help("PR number to review (defaults to the current branch's PR)"),
                )
                .arg(
                    clap::Arg::new("rules")
                        .long("rules")
                        .help("Path to the rules TOML file")
                        .value_hint(clap::ValueHint::FilePath),
                )
                .arg(
                    clap::Arg::new("comment")
                        .long("comment")
                        .help("Post the findings as a review comment")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("init").about("Write a starter rules file with commented defaults"))
}

/// Generate a completion script for the specified shell.
pub fn generate_completion_script(shell: ShellType) -> String {
    let mut cmd = build_cli();
    let mut buf = Vec::new();
    generate(shell.to_clap_shell(), &mut cmd, "prwarden", &mut buf);
    String::from_utf8(buf).unwrap_or_default()
}

/// Print a completion script to stdout.
pub fn print_completion_script(shell: ShellType) {
    print!("{}", generate_completion_script(shell));
}

/// Write a completion script to the specified path, creating parent
/// directories if needed.
pub fn write_completion_script(shell: ShellType, path: &PathBuf) -> Result<()> {
    ensure_completion_dir(path)?;

    let script = generate_completion_script(shell);
    let mut file = std::fs::File::create(path).map_err(|e| {
        WardenError::ShellCompletion(format!(
            "Failed to create completion file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(script.as_bytes()).map_err(|e| {
        WardenError::ShellCompletion(format!(
            "Failed to write completion script to '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Outcome of an automatic completion install.
#[derive(Debug)]
pub struct InstallResult {
    pub shell: ShellType,
    pub path: PathBuf,
    /// Extra setup the user still has to do, if any.
    pub setup_instructions: Option<String>,
}

/// Detect the user's shell and install completions for it.
pub fn install_completions() -> Result<InstallResult> {
    let shell = detect_shell()?;
    let path = get_completion_path(shell)?;
    write_completion_script(shell, &path)?;

    let setup_instructions = match shell {
        ShellType::Zsh => Some(
            "Make sure ~/.zfunc is in your fpath: add \
             `fpath=(~/.zfunc $fpath)` before `compinit` in your ~/.zshrc."
                .to_string(),
        ),
        ShellType::Bash | ShellType::Fish => None,
    };

    Ok(InstallResult {
        shell,
        path,
        setup_instructions,
    })
}

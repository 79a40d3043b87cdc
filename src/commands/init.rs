//! Init command handler.
//!
//! Writes a starter rules file into the current directory and installs
//! shell completions.

use std::path::Path;

use crate::completion;
use crate::config::{write_default_rules, DEFAULT_RULES_FILE};
use crate::error::Result;
use crate::output::{BOLD, CYAN, GRAY, GREEN, RESET, YELLOW};

/// Initialize prwarden for the current project.
///
/// Creates `prwarden.toml` with commented defaults (existing files are
/// left untouched) and installs completions for the user's shell.
/// Completion failures are reported but never fail the command.
pub fn init_command() -> Result<()> {
    println!("Initializing prwarden...");
    println!();

    let rules_path = Path::new(DEFAULT_RULES_FILE);
    if write_default_rules(rules_path)? {
        println!("  {GREEN}Created{RESET} {}", rules_path.display());
    } else {
        println!(
            "  {GRAY}Exists{RESET}  {} (left untouched)",
            rules_path.display()
        );
    }

    println!();
    println!("{BOLD}Shell completions:{RESET}");
    match completion::install_completions() {
        Ok(result) => {
            println!(
                "  {GREEN}Installed{RESET} {} completions to {}",
                result.shell,
                result.path.display()
            );
            if let Some(instructions) = result.setup_instructions {
                println!();
                println!("{YELLOW}Note:{RESET} {}", instructions);
            }
        }
        Err(e) => {
            // Don't fail init for completion errors - just inform the user
            let msg = e.to_string();
            if msg.contains("Unsupported shell") {
                println!("  {YELLOW}Skipped{RESET} Shell completions not available for your shell");
                println!("         Supported shells: bash, zsh, fish");
            } else if msg.contains("$SHELL") {
                println!("  {YELLOW}Skipped{RESET} Could not detect shell ($SHELL not set)");
            } else {
                println!(
                    "  {YELLOW}Warning{RESET} Could not install completions: {}",
                    e
                );
            }
        }
    }

    println!();
    println!("{BOLD}Next steps:{RESET}");
    println!("  Edit {CYAN}{DEFAULT_RULES_FILE}{RESET} to match your project's conventions");
    println!("  Run {CYAN}prwarden review{RESET} from a PR branch to try the checks");

    Ok(())
}

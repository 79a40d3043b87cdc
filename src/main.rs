//! prwarden CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command handler.

use clap::{Parser, Subcommand};
use prwarden::commands::{ci_command, init_command, review_command};
use prwarden::completion::{print_completion_script, ShellType, SUPPORTED_SHELLS};
use prwarden::output::{print_error, print_header};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prwarden")]
#[command(
    version,
    about = "Advisory convention checks for pull requests",
    after_help = "EXAMPLES:
    # Review the PR for the current branch
    prwarden review

    # Review a specific PR and post the report comment
    prwarden review --pr 42 --comment

    # Run inside CI against a shared rules file
    prwarden ci --rules rules.toml

    # See the comment a CI run would post, without posting it
    prwarden ci --dry-run

    # Write a starter prwarden.toml
    prwarden init"
)]
struct Cli {
    /// Print the full rendered review comment
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review the PR of the current CI job and sync the report comment
    #[command(after_help = "EXAMPLES:
    prwarden ci                        # Rules from ./prwarden.toml or defaults
    prwarden ci --rules shared.toml    # Rules from a central file
    prwarden ci --dry-run              # Print the report, post nothing

BEHAVIOR:
    The PR is taken from the GitHub Actions environment. Warnings are
    advisory: they go into the sticky PR comment and never fail the job.")]
    Ci {
        /// Path to the rules TOML file
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Evaluate and print, but do not post the comment
        #[arg(long)]
        dry_run: bool,
    },

    /// Review a PR from a local checkout
    #[command(after_help = "EXAMPLES:
    prwarden review                    # PR for the current branch
    prwarden review --pr 42            # A specific PR
    prwarden review --pr 42 --comment  # Also post the report comment")]
    Review {
        /// PR number to review (defaults to the current branch's PR)
        #[arg(long)]
        pr: Option<u64>,

        /// Path to the rules TOML file
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Post the findings as a review comment
        #[arg(long)]
        comment: bool,
    },

    /// Write a starter rules file and install shell completions
    Init,

    /// Output shell completion script to stdout (hidden utility command)
    #[command(hide = true)]
    Completions {
        /// Shell type to generate completions for (bash, zsh, or fish)
        shell: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        // Completions print a bare script, so no header
        Commands::Completions { shell } => match ShellType::from_name(shell) {
            Ok(shell_type) => {
                print_completion_script(shell_type);
                Ok(())
            }
            Err(e) => {
                print_error(&format!(
                    "{}\nSupported shells: {}",
                    e,
                    SUPPORTED_SHELLS.join(", ")
                ));
                std::process::exit(1);
            }
        },

        Commands::Ci { rules, dry_run } => {
            print_header();
            ci_command(rules.as_deref(), *dry_run, cli.verbose)
        }

        Commands::Review { pr, rules, comment } => {
            print_header();
            review_command(*pr, rules.as_deref(), *comment, cli.verbose)
        }

        Commands::Init => {
            print_header();
            init_command()
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

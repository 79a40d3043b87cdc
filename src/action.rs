//! GitHub Action entry point.
//!
//! Thin launcher around the `prwarden` binary: requires the token
//! input, installs the review tool when it is missing, resolves the
//! central rules file, and runs `prwarden ci` against it. The review's
//! exit code becomes the action's exit code.

use prwarden::launcher;
use prwarden::output::{print_error, print_info, print_success};

fn main() {
    let token = match launcher::require_token() {
        Ok(token) => token,
        Err(e) => {
            print_error(&format!("{} (pass the token input with pull-requests: write)", e));
            std::process::exit(1);
        }
    };

    if !launcher::is_installed(launcher::REVIEW_BIN) {
        print_info("Installing prwarden (cargo install prwarden-cli)...");
        match launcher::install_review_tool() {
            Ok(0) => {}
            Ok(code) => {
                print_error("Failed to install prwarden.");
                std::process::exit(code);
            }
            Err(e) => {
                print_error(&e.to_string());
                std::process::exit(1);
            }
        }
        if !launcher::is_installed(launcher::REVIEW_BIN) {
            print_error("prwarden is still missing after install; is ~/.cargo/bin on PATH?");
            std::process::exit(1);
        }
    }

    let rules = match launcher::resolve_rules_path() {
        Ok(path) => path,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    print_info(&format!("Running prwarden with rules from {}", rules.display()));
    match launcher::run_review(&rules, &token) {
        Ok(0) => {
            print_success("prwarden completed successfully.");
        }
        Ok(code) => {
            print_error(&format!("prwarden exited with code {}", code));
            std::process::exit(code);
        }
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

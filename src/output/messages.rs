//! Basic message output functions.
//!
//! Provides simple error, info, and success message display.

use super::colors::*;

/// Print an error message.
pub fn print_error(msg: &str) {
    println!("{RED}{BOLD}Error:{RESET} {}", msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{CYAN}Info:{RESET} {}", msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{GREEN}{}{RESET}", msg);
}

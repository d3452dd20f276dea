//! Message formatting shared by every command.
//!
//! Errors, warnings and confirmations always go to stdout with the same prefix
//! and spacing, so scripts and tests can match on them.
//!
//! | kind    | prefix        | color  |
//! |---------|---------------|--------|
//! | error   | `✕ Error:`    | red    |
//! | warning | `! Warning:`  | yellow |
//! | success | `✓`           | green  |

use colored::*;

/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Error followed by the accepted invocations and a hint per option.
///
/// ```text
///
/// ✕ Error: <message>.
/// Usage:
///   <usage_pattern>
///
/// Options:
///   <name>  <description>
///
/// ```
pub fn print_error_with_structured_usage(
    message: &str,
    usage_patterns: &[&str],
    options: &[(&str, &str)],
) {
    println!("\n{} {}.\n", "✕ Error:".red(), message.white());
    println!("{}", "Usage:".blue());
    for pattern in usage_patterns {
        println!("  {}", pattern.white());
    }

    if !options.is_empty() {
        println!("\n{}", "Options:".blue());
        for (name, description) in options {
            println!("  {}  {}", name.bright_black(), description.bright_black());
        }
    }
    println!();
}

/// A problem the command worked around, e.g. the baseline forecast types
/// standing in for an unreachable catalog
pub fn print_warning(message: &str) {
    println!("{} {}", "! Warning:".yellow(), message.white());
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// `<header>:` surrounded by blank lines
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

//! Console output for CI logs
//!
//! Build logs are read top to bottom in a CI job view, so each run opens with
//! a single ruled title line and ends with one status line.

use colored::Colorize;

const RULE_WIDTH: usize = 64;

/// `── Build and Push Container ─────...`
pub fn print_header(title: &str) {
    let label = format!("── {} ", title);
    let fill = RULE_WIDTH.saturating_sub(label.chars().count());
    println!();
    println!("{}{}", label.bold().cyan(), "─".repeat(fill).cyan());
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {}", "✔".green().bold(), message.green());
}

/// Printed to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✘".red().bold(), message.red().bold());
}

pub fn print_info(message: &str) {
    println!("{} {}", "•".cyan(), message);
}

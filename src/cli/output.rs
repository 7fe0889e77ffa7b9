//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{BuildReport, RenderEntry};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print one warning per link left out of the tree.
pub fn dropped(report: &BuildReport) {
    for d in &report.dropped {
        warning(&format!(
            "link '{}' not shown: {} ('{}')",
            d.name, d.reason, d.parent_name
        ));
    }
    if report.budget_exhausted {
        warning(&format!(
            "tree construction stopped after {} attempts",
            report.attempts
        ));
    }
}

/// One line of the breadth-first listing: parents bold, leaves plain.
pub fn format_entry(entry: &RenderEntry) -> String {
    let name = if entry.has_children {
        entry.name.bold().to_string()
    } else {
        entry.name.clone()
    };
    let mut line = match &entry.parent_name {
        Some(parent) => format!("{} {} {}", parent.dimmed(), "/".dimmed(), name),
        None => name,
    };
    if let Some(url) = &entry.url {
        line.push_str(&format!("  {}", url.blue().underline()));
    }
    line
}

//! Shared presentation: headings and status styling.

use crate::diff::DiffStatus;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Colors only when stdout is a terminal and NO_COLOR is unset
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Status code, colored per status when enabled
pub fn status_code(status: DiffStatus, color: bool) -> String {
    let code = status.code().to_string();
    if !color {
        return code;
    }
    match status {
        DiffStatus::Added => code.green().to_string(),
        DiffStatus::Deleted => code.red().to_string(),
        DiffStatus::Modified => code.yellow().to_string(),
        DiffStatus::Renamed => code.cyan().to_string(),
        DiffStatus::Unchanged => code.dimmed().to_string(),
    }
}

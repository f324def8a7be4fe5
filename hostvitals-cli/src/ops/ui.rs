//! Terminal rendering helpers.

use crossterm::style::Stylize;

const KEY_WIDTH: usize = 26;

/// Calculate display width of a string (accounting for wide chars like emoji).
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

/// Print a section header with box drawing characters.
pub fn print_header(title: &str) {
    let inner_width: usize = 58;
    let total_padding = inner_width.saturating_sub(display_width(title));
    let left_pad = total_padding / 2;
    let right_pad = total_padding - left_pad;

    println!();
    println!("{}", format!("╔{}╗", "═".repeat(inner_width)).dark_cyan());
    println!(
        "{}",
        format!("║{}{}{}║", " ".repeat(left_pad), title, " ".repeat(right_pad)).dark_cyan()
    );
    println!("{}", format!("╚{}╝", "═".repeat(inner_width)).dark_cyan());
}

/// Print a small section title.
pub fn print_section(title: &str) {
    println!();
    println!("  {} {}", "▸".dark_cyan(), title.white().bold());
    println!("  {}", "─".repeat(50).dark_grey());
}

/// Print an item heading inside a section (`#1`, `#2`, ...).
pub fn print_item(indent: usize, label: &str) {
    println!("{}{}", "  ".repeat(indent + 1), label.cyan());
}

/// Print an error message.
pub fn print_error(indent: usize, msg: &str) {
    println!("{}{} {}", "  ".repeat(indent + 1), "✗".red(), msg.red());
}

/// Print a key-value pair. "N/A" values are dimmed.
pub fn print_kv(indent: usize, key: &str, value: &str) {
    let width = KEY_WIDTH.saturating_sub(indent * 2);
    let value = if value == hostvitals_core::shape::NOT_AVAILABLE {
        value.dark_grey().to_string()
    } else {
        value.to_string()
    };
    let key = format!("{:<width$}", format!("{key}:"), width = width);
    println!("{}{} {}", "  ".repeat(indent + 1), key.dark_grey(), value);
}

/// Print a table header.
pub fn print_table_header(columns: &[(&str, usize)]) {
    let header: String = columns
        .iter()
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {}", header.white().bold());
    let separator: String = columns
        .iter()
        .map(|(_, width)| "─".repeat(*width))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {}", separator.dark_grey());
}

/// Print a table row.
pub fn print_table_row(columns: &[(&str, usize)]) {
    let row: String = columns
        .iter()
        .map(|(val, width)| format!("{:<width$}", val, width = width))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {}", row);
}

/// Print an empty state message.
pub fn print_empty(indent: usize, msg: &str) {
    println!("{}{}", "  ".repeat(indent + 1), msg.dark_grey().italic());
}

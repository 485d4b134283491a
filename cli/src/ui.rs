use colored::Colorize;

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    eprintln!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// Section title, e.g. a relation name in `hal links`
pub fn section_line(title: &str, detail: &str) -> String {
    if detail.is_empty() {
        format!("{}", title.cyan().bold())
    } else {
        format!("{} {}", title.cyan().bold(), detail.dimmed())
    }
}

/// One indented item line
pub fn item_line(text: &str, note: Option<&str>) -> String {
    match note {
        Some(note) => format!("  {} {}", text, format!("({})", note).yellow()),
        None => format!("  {}", text),
    }
}

//! ANSI color helpers for terminal output

use colored::Colorize;

/// Turn colors off when stdout is not a terminal
pub fn init() {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

/// Get colored H:MM:SS clock
pub fn colored_clock(clock: &str) -> String {
    format!("{:>8}", clock).white().dimmed().to_string()
}

/// Get colored source identifier
pub fn colored_source(source: &str) -> String {
    source.cyan().bold().to_string()
}

/// Get colored line position
pub fn colored_position(position: i64) -> String {
    format!("{:>5}", position).white().dimmed().to_string()
}

/// Get colored header
pub fn header(text: &str) -> String {
    text.bold().underline().to_string()
}

/// Get colored label
pub fn label(text: &str) -> String {
    text.white().dimmed().to_string()
}

/// Get colored value
pub fn value(text: &str) -> String {
    text.white().to_string()
}

/// Get colored success message
pub fn success(text: &str) -> String {
    format!("{} {}", "✓".green(), text)
}

/// Get colored warning message
pub fn warning(text: &str) -> String {
    format!("{} {}", "⚠".yellow(), text)
}

/// Get colored error message
pub fn error(text: &str) -> String {
    format!("{} {}", "✗".red(), text)
}

/// Format count with comma separators
pub fn format_count(n: i64) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::from(sign);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

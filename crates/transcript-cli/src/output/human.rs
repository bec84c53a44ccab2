//! Human-readable output formatting

use super::colors::*;
use transcript_core::{format_clock, ParseSummary, TranscriptLine};
use transcript_db::{DbStats, Page, SourceInfo, StoredLine};

/// Format a parsed line
pub fn format_line(line: &TranscriptLine) -> String {
    format!("{}  {}", colored_clock(&line.clock()), line.text)
}

/// Format a stored line with its position in the transcript
pub fn format_stored(line: &StoredLine, show_source: bool) -> String {
    let clock = colored_clock(&format_clock(line.timestamp));
    if show_source {
        format!(
            "{} {} {}  {}",
            colored_source(&line.source),
            colored_position(line.position),
            clock,
            line.text
        )
    } else {
        format!("{} {}  {}", colored_position(line.position), clock, line.text)
    }
}

/// One-line summary of a parse
pub fn format_summary(source: &str, summary: &ParseSummary) -> String {
    let range = match (summary.first_timestamp, summary.last_timestamp) {
        (Some(first), Some(last)) => format!("{} - {}", format_clock(first), format_clock(last)),
        _ => "empty".to_string(),
    };
    format!(
        "{}  {} lines, {} without player link  {}",
        colored_source(source),
        format_count(summary.lines as i64),
        format_count(summary.invalid as i64),
        label(&range)
    )
}

/// Footer under a page of results
pub fn format_page_footer<T>(page: &Page<T>) -> String {
    let mut footer = format!(
        "Page {} of {} ({} lines)",
        page.page,
        page.total_pages().max(1),
        format_count(page.total as i64)
    );
    if page.has_next() {
        footer.push_str(&format!("  next: --page {}", page.page + 1));
    }
    label(&footer)
}

/// Format an imported source for list output
pub fn format_source(info: &SourceInfo) -> String {
    format!(
        "{} {} lines ({} invalid)  {}",
        colored_source(&info.source),
        format_count(info.line_count),
        format_count(info.invalid_count),
        label(&info.imported_at)
    )
}

/// Format database statistics
pub fn format_stats(stats: &DbStats) -> String {
    let mut lines = Vec::new();

    let path = stats
        .db_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());
    lines.push(format!("{}: {}", label("Database"), value(&path)));
    lines.push(format!("{}: {}", label("Size"), value(&stats.format_size())));
    lines.push(format!("{}: {}", label("Schema version"), value(&stats.version.to_string())));
    lines.push(format!("{}: {}", label("Sources"), value(&format_count(stats.source_count))));
    lines.push(format!("{}: {}", label("Lines"), value(&format_count(stats.line_count))));
    lines.push(format!(
        "{}: {}",
        label("Lines without player link"),
        value(&format_count(stats.invalid_count))
    ));
    if let Some(last) = &stats.last_imported {
        lines.push(format!("{}: {}", label("Last import"), value(last)));
    }

    lines.join("\n")
}

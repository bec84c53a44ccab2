//! Minimal text output formatting

use transcript_core::TranscriptLine;
use transcript_db::{SourceInfo, StoredLine};

/// Format a parsed line as text only
pub fn format_line(line: &TranscriptLine) -> &str {
    &line.text
}

/// Format a stored line as text only
pub fn format_stored(line: &StoredLine) -> &str {
    &line.text
}

/// Format a source as its identifier
pub fn format_source(info: &SourceInfo) -> &str {
    &info.source
}

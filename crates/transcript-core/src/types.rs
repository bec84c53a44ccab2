//! Core type definitions for parsed transcript data

use serde::{Deserialize, Serialize};

use crate::timestamp::format_clock;

/// A single line of dialogue extracted from a transcript document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Anchor text followed by any trailing text on the same line
    pub text: String,
    /// Offset into the recording, in seconds
    pub timestamp: u64,
    /// Identifier of the document this line came from
    pub source: String,
}

impl TranscriptLine {
    pub fn new(text: impl Into<String>, timestamp: u64, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp,
            source: source.into(),
        }
    }

    /// Timestamp rendered as H:MM:SS
    pub fn clock(&self) -> String {
        format_clock(self.timestamp)
    }

    /// Get preview text for list display
    pub fn preview(&self, max_len: usize) -> String {
        let preview = self.text.lines().next().unwrap_or("").trim();
        // Use chars for proper unicode handling
        let chars: Vec<char> = preview.chars().collect();
        if chars.len() > max_len {
            let truncated: String = chars[..max_len.saturating_sub(3)].iter().collect();
            format!("{}...", truncated)
        } else {
            preview.to_string()
        }
    }
}

/// Everything produced by one parse of one transcript document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Lines in document order, including fallback lines for malformed entries
    pub lines: Vec<TranscriptLine>,
    /// HTML-escaped raw text of every entry that was not an annotated line
    pub invalid_lines: Vec<String>,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Counts and timestamp range of the result
    pub fn summary(&self) -> ParseSummary {
        ParseSummary {
            lines: self.lines.len(),
            invalid: self.invalid_lines.len(),
            first_timestamp: self.lines.iter().map(|l| l.timestamp).min(),
            last_timestamp: self.lines.iter().map(|l| l.timestamp).max(),
        }
    }
}

/// Aggregate view over a [`ParseResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines: usize,
    pub invalid: usize,
    pub first_timestamp: Option<u64>,
    pub last_timestamp: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let line = TranscriptLine::new("héllo wörld, this is long", 0, "s");
        assert_eq!(line.preview(10), "héllo w...");
        assert_eq!(line.preview(100), "héllo wörld, this is long");
    }

    #[test]
    fn test_preview_uses_first_line() {
        let line = TranscriptLine::new("  first\nsecond", 0, "s");
        assert_eq!(line.preview(20), "first");
    }

    #[test]
    fn test_clock() {
        assert_eq!(TranscriptLine::new("x", 3723, "s").clock(), "1:02:03");
    }

    #[test]
    fn test_summary_range() {
        let result = ParseResult {
            lines: vec![
                TranscriptLine::new("a", 30, "s"),
                TranscriptLine::new("b", 10, "s"),
                TranscriptLine::new("c", 11, "s"),
            ],
            invalid_lines: vec!["c".to_string()],
        };
        let summary = result.summary();
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.first_timestamp, Some(10));
        assert_eq!(summary.last_timestamp, Some(30));
    }

    #[test]
    fn test_serializes_with_snake_case_fields() {
        let result = ParseResult {
            lines: vec![TranscriptLine::new("Hello", 5, "a.opml")],
            invalid_lines: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["lines"][0]["text"], "Hello");
        assert_eq!(json["lines"][0]["timestamp"], 5);
        assert_eq!(json["invalid_lines"].as_array().unwrap().len(), 0);
    }
}

//! Line filtering utilities

use crate::types::TranscriptLine;

/// Filter options for transcript lines
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Case-insensitive text search
    pub search: Option<String>,
    /// Earliest timestamp to keep (inclusive)
    pub from: Option<u64>,
    /// Latest timestamp to keep (inclusive)
    pub to: Option<u64>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_window(mut self, from: Option<u64>, to: Option<u64>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.from.is_none() && self.to.is_none()
    }
}

/// Filter transcript lines based on options, keeping document order
pub fn filter_lines<'a>(
    lines: &'a [TranscriptLine],
    options: &FilterOptions,
) -> Vec<&'a TranscriptLine> {
    let mut result: Vec<&TranscriptLine> = lines.iter().collect();

    if let Some(from) = options.from {
        result.retain(|line| line.timestamp >= from);
    }

    if let Some(to) = options.to {
        result.retain(|line| line.timestamp <= to);
    }

    if let Some(search) = &options.search {
        let search_lower = search.to_lowercase();
        result.retain(|line| line.text.to_lowercase().contains(&search_lower));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<TranscriptLine> {
        vec![
            TranscriptLine::new("Hello world", 10, "s"),
            TranscriptLine::new("goodbye", 20, "s"),
            TranscriptLine::new("HELLO again", 30, "s"),
        ]
    }

    #[test]
    fn test_filter_by_search() {
        let lines = lines();
        let opts = FilterOptions::new().with_search("hello");
        let filtered = filter_lines(&lines, &opts);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[1].text, "HELLO again");
    }

    #[test]
    fn test_filter_by_window() {
        let lines = lines();
        let opts = FilterOptions::new().with_window(Some(15), Some(30));
        let filtered = filter_lines(&lines, &opts);
        assert_eq!(filtered.iter().map(|l| l.timestamp).collect::<Vec<_>>(), vec![20, 30]);
    }

    #[test]
    fn test_empty_options_keep_everything() {
        let lines = lines();
        let opts = FilterOptions::new();
        assert!(opts.is_empty());
        assert_eq!(filter_lines(&lines, &opts).len(), 3);
    }
}

//! Saving parse results and looking up imported sources

use rusqlite::{params, Row};
use tracing::info;
use transcript_core::ParseResult;

use crate::connection::{DbError, TranscriptStore};
use crate::queries::to_db_seconds;

/// An imported transcript document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    pub source: String,
    pub line_count: i64,
    pub invalid_count: i64,
    /// RFC 3339 time of the last import
    pub imported_at: String,
}

impl TranscriptStore {
    /// Replace everything stored for `source` with `result`
    ///
    /// Runs in a single transaction. Returns the number of lines stored.
    pub fn save(&mut self, source: &str, result: &ParseResult) -> Result<usize, DbError> {
        let imported_at = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM lines WHERE source = ?1", [source])?;
        {
            let mut insert = tx.prepare_cached(
                "INSERT INTO lines (source, position, text, timestamp) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, line) in result.lines.iter().enumerate() {
                insert.execute(params![
                    source,
                    position as i64,
                    line.text,
                    to_db_seconds(line.timestamp)
                ])?;
            }
        }

        tx.execute(
            "INSERT OR REPLACE INTO sources (source, line_count, invalid_count, imported_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                source,
                result.lines.len() as i64,
                result.invalid_lines.len() as i64,
                imported_at
            ],
        )?;
        tx.commit()?;

        info!(
            source,
            lines = result.lines.len(),
            invalid = result.invalid_lines.len(),
            "saved transcript"
        );
        Ok(result.lines.len())
    }

    /// All imported sources, most recent import first
    pub fn sources(&self) -> Result<Vec<SourceInfo>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT source, line_count, invalid_count, imported_at
             FROM sources
             ORDER BY imported_at DESC, source ASC",
        )?;
        let rows = stmt.query_map([], row_to_source_info)?;

        let mut sources = Vec::new();
        for row in rows {
            sources.push(row?);
        }
        Ok(sources)
    }

    /// Look up one imported source
    pub fn source(&self, source: &str) -> Result<Option<SourceInfo>, DbError> {
        let result = self.conn.query_row(
            "SELECT source, line_count, invalid_count, imported_at FROM sources WHERE source = ?1",
            [source],
            row_to_source_info,
        );

        match result {
            Ok(info) => Ok(Some(info)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a source and its lines; returns whether it existed
    pub fn delete_source(&mut self, source: &str) -> Result<bool, DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM lines WHERE source = ?1", [source])?;
        let removed = tx.execute("DELETE FROM sources WHERE source = ?1", [source])?;
        tx.commit()?;
        Ok(removed > 0)
    }
}

fn row_to_source_info(row: &Row) -> rusqlite::Result<SourceInfo> {
    Ok(SourceInfo {
        source: row.get(0)?,
        line_count: row.get(1)?,
        invalid_count: row.get(2)?,
        imported_at: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{LineCriteria, OrderBy, SortField, StoredLine};
    use transcript_core::TranscriptLine;

    fn result(source: &str, lines: &[(&str, u64)], invalid: &[&str]) -> ParseResult {
        ParseResult {
            lines: lines
                .iter()
                .map(|(text, ts)| TranscriptLine::new(*text, *ts, source))
                .collect(),
            invalid_lines: invalid.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_save_and_read_back_in_order() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        let parsed = result("a", &[("one", 10), ("two", 5), ("three", 11)], &["three"]);

        assert_eq!(store.save("a", &parsed).unwrap(), 3);

        let lines = store.find_by(&LineCriteria::for_source("a"), &[], None, None).unwrap();
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        // default order is by timestamp within a source
        assert_eq!(texts, vec!["two", "one", "three"]);

        let by_position = store
            .find_by(&LineCriteria::for_source("a"), &[OrderBy::asc(SortField::Position)], None, None)
            .unwrap();
        let lines: Vec<TranscriptLine> = by_position.into_iter().map(StoredLine::into_line).collect();
        assert_eq!(lines, parsed.lines);
    }

    #[test]
    fn test_save_replaces_previous_import() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        store.save("a", &result("a", &[("old", 1), ("older", 2)], &[])).unwrap();
        store.save("a", &result("a", &[("new", 3)], &["new"])).unwrap();

        let lines = store.find_by(&LineCriteria::for_source("a"), &[], None, None).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "new");

        let info = store.source("a").unwrap().unwrap();
        assert_eq!(info.line_count, 1);
        assert_eq!(info.invalid_count, 1);
    }

    #[test]
    fn test_empty_result_still_records_source() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        store.save("empty", &ParseResult::default()).unwrap();

        let sources = store.sources().unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].source, "empty");
        assert_eq!(sources[0].line_count, 0);
    }

    #[test]
    fn test_sources_are_isolated() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        store.save("a", &result("a", &[("a1", 1)], &[])).unwrap();
        store.save("b", &result("b", &[("b1", 1), ("b2", 2)], &[])).unwrap();

        assert_eq!(store.count(&LineCriteria::for_source("a")).unwrap(), 1);
        assert_eq!(store.count(&LineCriteria::for_source("b")).unwrap(), 2);
        assert_eq!(store.count(&LineCriteria::new()).unwrap(), 3);

        assert!(store.delete_source("a").unwrap());
        assert!(!store.delete_source("a").unwrap());
        assert_eq!(store.count(&LineCriteria::new()).unwrap(), 2);
        assert!(store.source("a").unwrap().is_none());
    }

    #[test]
    fn test_paginate() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        let lines: Vec<(String, u64)> = (0..7).map(|i| (format!("line {}", i), i)).collect();
        let borrowed: Vec<(&str, u64)> = lines.iter().map(|(t, ts)| (t.as_str(), *ts)).collect();
        store.save("a", &result("a", &borrowed, &[])).unwrap();

        let criteria = LineCriteria::for_source("a");
        let first = store.paginate(&criteria, 1, 3).unwrap();
        assert_eq!(first.items.len(), 3);
        assert_eq!(first.total, 7);
        assert_eq!(first.total_pages(), 3);
        assert_eq!(first.items[0].text, "line 0");

        let last = store.paginate(&criteria, 3, 3).unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].text, "line 6");
        assert!(!last.has_next());

        let past_end = store.paginate(&criteria, 9, 3).unwrap();
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total, 7);

        let zero = store.paginate(&criteria, 0, 0).unwrap();
        assert_eq!(zero.page, 1);
        assert_eq!(zero.per_page, crate::queries::DEFAULT_PER_PAGE);
        assert_eq!(zero.items.len(), 7);
    }

    #[test]
    fn test_search_and_window() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        store
            .save("a", &result("a", &[("Hello world", 10), ("bye", 20), ("hello again", 30)], &[]))
            .unwrap();

        let hits = store
            .find_by(&LineCriteria::new().with_search("hello"), &[], None, None)
            .unwrap();
        assert_eq!(hits.len(), 2);

        let windowed = store
            .find_by(&LineCriteria::new().with_window(Some(15), Some(30)), &[], None, None)
            .unwrap();
        assert_eq!(windowed.iter().map(|l| l.timestamp).collect::<Vec<_>>(), vec![20, 30]);

        let one = store
            .find_one_by(&LineCriteria::new(), &[OrderBy::desc(SortField::Timestamp)])
            .unwrap()
            .unwrap();
        assert_eq!(one.text, "hello again");
    }

    #[test]
    fn test_search_wildcards_match_literally() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        store
            .save("a", &result("a", &[("50% off", 1), ("500 off", 2), ("a_b", 3), ("axb", 4)], &[]))
            .unwrap();

        let percent = store.find_by(&LineCriteria::new().with_search("50%"), &[], None, None).unwrap();
        assert_eq!(percent.iter().map(|l| l.text.as_str()).collect::<Vec<_>>(), vec!["50% off"]);

        let underscore = store.find_by(&LineCriteria::new().with_search("a_b"), &[], None, None).unwrap();
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].text, "a_b");
    }

    #[test]
    fn test_stats_after_import() {
        let mut store = TranscriptStore::open_in_memory().unwrap();
        store.save("a", &result("a", &[("x", 1), ("y", 2)], &["y"])).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.line_count, 2);
        assert_eq!(stats.source_count, 1);
        assert_eq!(stats.invalid_count, 1);
        assert!(stats.last_imported.is_some());
        assert!(stats.db_path.is_none());
    }
}

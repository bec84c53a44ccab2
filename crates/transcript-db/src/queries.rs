//! Line lookup and pagination

use rusqlite::{Row, ToSql};
use transcript_core::TranscriptLine;

use crate::connection::{DbError, TranscriptStore};

/// Lines per page when the caller doesn't say otherwise
pub const DEFAULT_PER_PAGE: u32 = 50;

/// A transcript line as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLine {
    pub id: i64,
    pub source: String,
    /// Index of the line within its parse result
    pub position: i64,
    pub text: String,
    pub timestamp: u64,
}

impl StoredLine {
    pub fn into_line(self) -> TranscriptLine {
        TranscriptLine::new(self.text, self.timestamp, self.source)
    }
}

/// Which lines a query matches
#[derive(Debug, Clone, Default)]
pub struct LineCriteria {
    pub source: Option<String>,
    /// Substring match on text
    pub search: Option<String>,
    /// Earliest timestamp (inclusive)
    pub from: Option<u64>,
    /// Latest timestamp (inclusive)
    pub to: Option<u64>,
}

impl LineCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Default::default()
        }
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

    /// WHERE clause (starting with `WHERE 1=1`) and its parameters
    fn to_sql(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut sql = String::from(" WHERE 1=1");
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(source) = &self.source {
            sql.push_str(" AND source = ?");
            params.push(Box::new(source.clone()));
        }

        if let Some(search) = &self.search {
            sql.push_str(" AND text LIKE ? ESCAPE '\\'");
            params.push(Box::new(format!("%{}%", escape_like(search))));
        }

        if let Some(from) = self.from {
            sql.push_str(" AND timestamp >= ?");
            params.push(Box::new(to_db_seconds(from)));
        }

        if let Some(to) = self.to {
            sql.push_str(" AND timestamp <= ?");
            params.push(Box::new(to_db_seconds(to)));
        }

        (sql, params)
    }
}

/// Make `%`, `_` and `\` match literally under `ESCAPE '\'`
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Source,
    Timestamp,
    Position,
}

impl SortField {
    fn column(self) -> &'static str {
        match self {
            SortField::Source => "source",
            SortField::Timestamp => "timestamp",
            SortField::Position => "position",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: SortField,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Ordering appended to every query after the caller's own
pub const DEFAULT_ORDER: [OrderBy; 3] = [
    OrderBy {
        field: SortField::Source,
        direction: Direction::Asc,
    },
    OrderBy {
        field: SortField::Timestamp,
        direction: Direction::Asc,
    },
    OrderBy {
        field: SortField::Position,
        direction: Direction::Asc,
    },
];

/// Caller ordering first, then any default field the caller didn't name
fn order_clause(order: &[OrderBy]) -> String {
    let mut terms: Vec<OrderBy> = Vec::with_capacity(order.len() + DEFAULT_ORDER.len());
    for o in order.iter().chain(DEFAULT_ORDER.iter()) {
        if !terms.iter().any(|t| t.field == o.field) {
            terms.push(*o);
        }
    }

    let parts: Vec<String> = terms
        .iter()
        .map(|o| {
            let dir = match o.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!("{} {}", o.field.column(), dir)
        })
        .collect();

    format!(" ORDER BY {}", parts.join(", "))
}

/// One page of query results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    /// Matches across all pages
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        u32::try_from(self.total.div_ceil(u64::from(self.per_page))).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

impl TranscriptStore {
    /// Lines matching `criteria`, ordered by `order` then the default order
    pub fn find_by(
        &self,
        criteria: &LineCriteria,
        order: &[OrderBy],
        limit: Option<u32>,
        offset: Option<u64>,
    ) -> Result<Vec<StoredLine>, DbError> {
        let (where_sql, mut params) = criteria.to_sql();
        let mut sql = format!(
            "SELECT id, source, position, text, timestamp FROM lines{}{}",
            where_sql,
            order_clause(order)
        );

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(i64::from(limit)));
            if let Some(offset) = offset {
                sql.push_str(" OFFSET ?");
                params.push(Box::new(to_db_seconds(offset)));
            }
        } else if let Some(offset) = offset {
            sql.push_str(" LIMIT -1 OFFSET ?");
            params.push(Box::new(to_db_seconds(offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt.query_map(param_refs.as_slice(), row_to_line)?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    /// First line matching `criteria`, if any
    pub fn find_one_by(
        &self,
        criteria: &LineCriteria,
        order: &[OrderBy],
    ) -> Result<Option<StoredLine>, DbError> {
        Ok(self.find_by(criteria, order, Some(1), None)?.into_iter().next())
    }

    /// Number of lines matching `criteria`
    pub fn count(&self, criteria: &LineCriteria) -> Result<u64, DbError> {
        let (where_sql, params) = criteria.to_sql();
        let sql = format!("SELECT COUNT(*) FROM lines{}", where_sql);
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let count: i64 = self
            .conn
            .query_row(&sql, param_refs.as_slice(), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Page `page` (1-based; 0 is read as 1) of the lines matching `criteria`
    pub fn paginate(
        &self,
        criteria: &LineCriteria,
        page: u32,
        per_page: u32,
    ) -> Result<Page<StoredLine>, DbError> {
        let page = page.max(1);
        let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
        let total = self.count(criteria)?;
        let offset = u64::from(page - 1) * u64::from(per_page);

        let items = self.find_by(criteria, &[], Some(per_page), Some(offset))?;

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }
}

/// SQLite integers are signed; clamp seconds into range
pub(crate) fn to_db_seconds(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn row_to_line(row: &Row) -> rusqlite::Result<StoredLine> {
    let timestamp: i64 = row.get(4)?;
    Ok(StoredLine {
        id: row.get(0)?,
        source: row.get(1)?,
        position: row.get(2)?,
        text: row.get(3)?,
        timestamp: timestamp.max(0) as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_appends_defaults() {
        assert_eq!(
            order_clause(&[]),
            " ORDER BY source ASC, timestamp ASC, position ASC"
        );
        assert_eq!(
            order_clause(&[OrderBy::desc(SortField::Timestamp)]),
            " ORDER BY timestamp DESC, source ASC, position ASC"
        );
    }

    #[test]
    fn test_page_math() {
        let page: Page<()> = Page {
            items: vec![],
            page: 2,
            per_page: 50,
            total: 101,
        };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let last: Page<()> = Page {
            items: vec![],
            page: 3,
            per_page: 50,
            total: 101,
        };
        assert!(!last.has_next());

        let huge: Page<()> = Page {
            items: vec![],
            page: 1,
            per_page: 1,
            total: u64::MAX,
        };
        assert_eq!(huge.total_pages(), u32::MAX);
    }

    #[test]
    fn test_criteria_sql() {
        let (sql, params) = LineCriteria::for_source("a")
            .with_search("hi")
            .with_window(Some(1), None)
            .to_sql();
        assert_eq!(sql, " WHERE 1=1 AND source = ? AND text LIKE ? ESCAPE '\\' AND timestamp >= ?");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}

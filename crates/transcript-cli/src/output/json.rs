//! JSON output formatting

use serde::Serialize;
use serde_json::{json, Value};
use transcript_core::TranscriptLine;
use transcript_db::{Page, SourceInfo, StoredLine};

pub fn line_to_json(line: &TranscriptLine) -> Value {
    json!({
        "text": line.text,
        "timestamp": line.timestamp,
        "source": line.source,
    })
}

pub fn stored_to_json(line: &StoredLine) -> Value {
    json!({
        "id": line.id,
        "source": line.source,
        "position": line.position,
        "text": line.text,
        "timestamp": line.timestamp,
    })
}

pub fn source_to_json(info: &SourceInfo) -> Value {
    json!({
        "source": info.source,
        "line_count": info.line_count,
        "invalid_count": info.invalid_count,
        "imported_at": info.imported_at,
    })
}

pub fn page_to_json(page: &Page<StoredLine>) -> Value {
    json!({
        "page": page.page,
        "per_page": page.per_page,
        "total": page.total,
        "total_pages": page.total_pages(),
        "items": page.items.iter().map(stored_to_json).collect::<Vec<_>>(),
    })
}

/// Print values as JSON lines, or as one pretty array when `pretty` is set
pub fn print_all(values: &[Value], pretty: bool) {
    if pretty {
        println!("{}", serde_json::to_string_pretty(values).unwrap_or_default());
    } else {
        for value in values {
            println!("{}", value);
        }
    }
}

/// Print any serializable value
pub fn print_value<T: Serialize>(value: &T, pretty: bool) {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", out.unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_to_json() {
        let value = line_to_json(&TranscriptLine::new("Hello world", 90, "a.opml"));
        assert_eq!(value["text"], "Hello world");
        assert_eq!(value["timestamp"], 90);
        assert_eq!(value["source"], "a.opml");
    }

    #[test]
    fn test_page_to_json() {
        let page = Page {
            items: vec![StoredLine {
                id: 1,
                source: "a".to_string(),
                position: 0,
                text: "x".to_string(),
                timestamp: 5,
            }],
            page: 1,
            per_page: 50,
            total: 1,
        };
        let value = page_to_json(&page);
        assert_eq!(value["total_pages"], 1);
        assert_eq!(value["items"][0]["timestamp"], 5);
    }
}

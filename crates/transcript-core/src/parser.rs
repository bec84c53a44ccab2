//! Outline transcript parsing
//!
//! A transcript document is an OPML outline: `body > outline > outline[]`,
//! where each inner outline's `text` attribute holds one line of dialogue.
//! Lines that carry a player link get the link's timestamp; lines that don't
//! are kept as escaped text placed one second after the last linked line.

use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, info};

use crate::error::{StructureError, TranscriptError};
use crate::loader::DocumentLoader;
use crate::markup::{escape_html, match_annotated};
use crate::timestamp::normalize_timestamp;
use crate::types::{ParseResult, TranscriptLine};

/// Parses transcript documents fetched through a [`DocumentLoader`]
#[derive(Debug, Clone)]
pub struct TranscriptParser<L> {
    loader: L,
}

impl<L: DocumentLoader> TranscriptParser<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Load `source` and extract its lines
    pub fn parse(&self, source: &str) -> Result<ParseResult, TranscriptError> {
        let content = self.loader.load(source)?;
        parse_document(source, &content).map_err(|error| TranscriptError::Structure {
            locator: source.to_string(),
            error,
        })
    }
}

/// Extract lines from an already-loaded document
pub fn parse_document(source: &str, content: impl AsRef<[u8]>) -> Result<ParseResult, StructureError> {
    let text = decode(content.as_ref())?;
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)?;
    let group = line_group(&doc)?;

    let result = group
        .children()
        .filter(|node| node.has_tag_name("outline"))
        .map(|node| node.attribute("text").unwrap_or(""))
        .filter(|raw| !raw.is_empty())
        .fold(LineAccumulator::new(source), LineAccumulator::push)
        .finish();

    info!(
        source,
        lines = result.lines.len(),
        invalid = result.invalid_lines.len(),
        "parsed transcript"
    );

    Ok(result)
}

/// Document bytes as UTF-8 text, without a byte order mark
fn decode(bytes: &[u8]) -> Result<&str, StructureError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    Ok(std::str::from_utf8(bytes)?)
}

/// The grouping outline whose children are the transcript lines
fn line_group<'a, 'input>(doc: &'a Document<'input>) -> Result<Node<'a, 'input>, StructureError> {
    let body = child_element(doc.root_element(), "body").ok_or(StructureError::MissingElement("body"))?;
    child_element(body, "outline").ok_or(StructureError::MissingElement("outline"))
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}

/// Fold state: output so far and the timestamp of the last linked line
struct LineAccumulator<'s> {
    source: &'s str,
    last_good: u64,
    result: ParseResult,
}

impl<'s> LineAccumulator<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            last_good: 0,
            result: ParseResult::default(),
        }
    }

    fn push(mut self, raw: &str) -> Self {
        match match_annotated(raw) {
            Some(annotated) => {
                let timestamp = normalize_timestamp(&annotated.raw_timestamp);
                self.result
                    .lines
                    .push(TranscriptLine::new(annotated.text(), timestamp, self.source));
                self.last_good = timestamp;
            }
            None => {
                let escaped = escape_html(raw);
                let timestamp = self.last_good.saturating_add(1);
                debug!(source = self.source, timestamp, line = raw, "line has no player link");
                self.result.invalid_lines.push(escaped.clone());
                self.result
                    .lines
                    .push(TranscriptLine::new(escaped, timestamp, self.source));
            }
        }
        self
    }

    fn finish(self) -> ParseResult {
        self.result
    }
}

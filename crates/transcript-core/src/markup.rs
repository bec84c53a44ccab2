//! Tokenizing and matching the markup held in an outline line
//!
//! An annotated line looks like
//! `<a target='naplayer' title='click to play' href='http://naplay.it/{show}/{time}'>{first}</a>{last}`.
//! The line is parsed as an HTML fragment and matched on the resulting
//! nodes, so attribute order, quoting and spacing do not affect the match.
//! Captured text is sliced from the raw line, entities and markup untouched.

use scraper::{ElementRef, Html};

/// `target` attribute carried by player links
pub const PLAYER_TARGET: &str = "naplayer";
/// `title` attribute carried by player links
pub const PLAYER_TITLE: &str = "click to play";
/// Everything in a player `href` before `{show}/{time}`
pub const PLAYER_URL_PREFIX: &str = "http://naplay.it/";

/// Leading anchor element of a line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorToken {
    pub href: Option<String>,
    pub target: Option<String>,
    pub title: Option<String>,
    /// Raw anchor content; `None` when it contains anything but text
    pub text: Option<String>,
}

/// A line split into its leading anchor (if any) and whatever follows it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTokens {
    pub anchor: Option<AnchorToken>,
    /// Raw text after the anchor's closing tag, or the whole line
    pub trailing: String,
}

/// Fields captured from a well-formed annotated line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    pub show_code: String,
    pub raw_timestamp: String,
    pub first_text: String,
    pub last_text: String,
}

impl AnnotatedLine {
    /// Match tokens against the player-link shape
    pub fn from_tokens(tokens: LineTokens) -> Option<Self> {
        let LineTokens { anchor, trailing } = tokens;
        let anchor = anchor?;

        if anchor.target.as_deref() != Some(PLAYER_TARGET)
            || anchor.title.as_deref() != Some(PLAYER_TITLE)
        {
            return None;
        }

        let (show_code, raw_timestamp) = split_player_href(anchor.href.as_deref()?)?;
        let first_text = anchor.text.filter(|t| !t.is_empty())?;
        if trailing.is_empty() {
            return None;
        }

        Some(Self {
            show_code: show_code.to_string(),
            raw_timestamp: raw_timestamp.to_string(),
            first_text,
            last_text: trailing,
        })
    }

    /// Visible text of the line
    pub fn text(&self) -> String {
        format!("{}{}", self.first_text, self.last_text)
    }
}

/// Tokenize and match a raw line in one step
pub fn match_annotated(raw: &str) -> Option<AnnotatedLine> {
    AnnotatedLine::from_tokens(tokenize_line(raw))
}

/// Split a raw line into its leading anchor and trailing markup
pub fn tokenize_line(raw: &str) -> LineTokens {
    let fragment = Html::parse_fragment(raw);
    let root = fragment.root_element();

    let leading = root
        .children()
        .next()
        .and_then(ElementRef::wrap)
        .filter(|el| el.value().name() == "a");

    let Some(el) = leading else {
        return LineTokens {
            anchor: None,
            trailing: raw.to_string(),
        };
    };

    let spans = anchor_spans(raw);
    let attr = |name: &str| el.value().attr(name).map(str::to_string);
    let text_only = el.children().all(|child| child.value().is_text());
    let anchor = AnchorToken {
        href: attr("href"),
        target: attr("target"),
        title: attr("title"),
        text: spans
            .filter(|(inner, _)| text_only && !inner.contains('<'))
            .map(|(inner, _)| inner.to_string()),
    };

    LineTokens {
        anchor: Some(anchor),
        trailing: spans.map(|(_, rest)| rest.to_string()).unwrap_or_default(),
    }
}

/// Raw anchor content and everything after `</a>`, for a line starting with `<a`
fn anchor_spans(raw: &str) -> Option<(&str, &str)> {
    let after_open = &raw[tag_end(raw)?..];
    let close = closing_anchor(after_open)?;
    let closing = &after_open[close..];
    Some((&after_open[..close], &closing[tag_end(closing)?..]))
}

/// Byte offset just past the `>` ending the tag at the start of `s`
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    for (i, b) in s.bytes().enumerate() {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Offset of the first `</a>` end tag, in any letter case
fn closing_anchor(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (0..bytes.len()).find(|&i| {
        bytes[i..].len() >= 3
            && bytes[i..i + 3].eq_ignore_ascii_case(b"</a")
            && matches!(bytes.get(i + 3), Some(b'>' | b' ' | b'\t' | b'\n' | b'\r' | b'/'))
    })
}

/// `{show}/{time}` from a player URL
fn split_player_href(href: &str) -> Option<(&str, &str)> {
    let path = href.strip_prefix(PLAYER_URL_PREFIX)?;
    let (show_code, raw_timestamp) = path.split_once('/')?;

    if show_code.is_empty() || raw_timestamp.is_empty() {
        return None;
    }
    if !raw_timestamp.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return None;
    }

    Some((show_code, raw_timestamp))
}

/// Escape the five HTML special characters, quotes included
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "<a target='naplayer' title='click to play' href='http://naplay.it/1234/0-01-30'>Hello</a> world";

    #[test]
    fn test_match_well_formed_line() {
        let line = match_annotated(GOOD).unwrap();
        assert_eq!(line.show_code, "1234");
        assert_eq!(line.raw_timestamp, "0-01-30");
        assert_eq!(line.first_text, "Hello");
        assert_eq!(line.last_text, " world");
        assert_eq!(line.text(), "Hello world");
    }

    #[test]
    fn test_attribute_order_and_quotes_do_not_matter() {
        let raw = r#"<a href="http://naplay.it/na-1200/95"  title="click to play" target="naplayer">Adam</a>: yes"#;
        let line = match_annotated(raw).unwrap();
        assert_eq!(line.show_code, "na-1200");
        assert_eq!(line.raw_timestamp, "95");
        assert_eq!(line.text(), "Adam: yes");
    }

    #[test]
    fn test_trailing_markup_is_kept() {
        let raw = "<a target='naplayer' title='click to play' href='http://naplay.it/1/5'>John</a> said <b>this</b>";
        let line = match_annotated(raw).unwrap();
        assert_eq!(line.last_text, " said <b>this</b>");
    }

    #[test]
    fn test_entities_are_kept_verbatim() {
        let raw = "<a target='naplayer' title='click to play' href='http://naplay.it/1/5'>Tom &amp; Jerry</a> says &lt;b&gt;hi <i>x</i>";
        let line = match_annotated(raw).unwrap();
        assert_eq!(line.first_text, "Tom &amp; Jerry");
        assert_eq!(line.last_text, " says &lt;b&gt;hi <i>x</i>");
    }

    #[test]
    fn test_upper_case_closing_tag() {
        let raw = "<A target='naplayer' title='click to play' href='http://naplay.it/1/5'>Ann</A>: ok";
        let line = match_annotated(raw).unwrap();
        assert_eq!(line.text(), "Ann: ok");
    }

    #[test]
    fn test_plain_text_is_not_annotated() {
        assert!(match_annotated("raw line").is_none());
        let tokens = tokenize_line("raw line");
        assert!(tokens.anchor.is_none());
        assert_eq!(tokens.trailing, "raw line");
    }

    #[test]
    fn test_wrong_attributes_rejected() {
        let wrong_target = "<a target='other' title='click to play' href='http://naplay.it/1/5'>x</a> y";
        let wrong_title = "<a target='naplayer' title='play' href='http://naplay.it/1/5'>x</a> y";
        let wrong_host = "<a target='naplayer' title='click to play' href='http://example.com/1/5'>x</a> y";
        assert!(match_annotated(wrong_target).is_none());
        assert!(match_annotated(wrong_title).is_none());
        assert!(match_annotated(wrong_host).is_none());
    }

    #[test]
    fn test_bad_href_paths_rejected() {
        let no_time = "<a target='naplayer' title='click to play' href='http://naplay.it/1234'>x</a> y";
        let letters = "<a target='naplayer' title='click to play' href='http://naplay.it/1234/1m30s'>x</a> y";
        let extra_segment = "<a target='naplayer' title='click to play' href='http://naplay.it/1/2/3'>x</a> y";
        assert!(match_annotated(no_time).is_none());
        assert!(match_annotated(letters).is_none());
        assert!(match_annotated(extra_segment).is_none());
    }

    #[test]
    fn test_requires_anchor_text_and_trailing_text() {
        let empty_anchor = "<a target='naplayer' title='click to play' href='http://naplay.it/1/5'></a> y";
        let nested = "<a target='naplayer' title='click to play' href='http://naplay.it/1/5'><b>x</b></a> y";
        let no_trailing = "<a target='naplayer' title='click to play' href='http://naplay.it/1/5'>x</a>";
        assert!(match_annotated(empty_anchor).is_none());
        assert!(match_annotated(nested).is_none());
        assert!(match_annotated(no_trailing).is_none());
    }

    #[test]
    fn test_anchor_must_lead_the_line() {
        let raw = format!("prefix {}", GOOD);
        assert!(match_annotated(&raw).is_none());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("raw line"), "raw line");
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
    }
}

//! transcript-core - Parsing of naplay.it annotated show transcripts
//!
//! This crate turns an OPML transcript document into a flat, time-ordered
//! list of dialogue lines, recovering lines that lack a player link instead
//! of failing on them.

pub mod error;
pub mod filter;
pub mod loader;
pub mod markup;
pub mod parser;
pub mod timestamp;
pub mod types;

pub use error::*;
pub use filter::*;
pub use loader::*;
pub use markup::{escape_html, match_annotated, AnnotatedLine};
pub use parser::*;
pub use timestamp::*;
pub use types::*;

//! CLI command implementations

pub mod import;
pub mod parse;
pub mod search;
pub mod sources;
pub mod stats;
pub mod view;

use anyhow::{Context, Result};
use transcript_core::{SourceLoader, TranscriptParser};

use crate::cli::Cli;

/// Parser that loads files and URLs with the configured HTTP timeout
pub fn build_parser(cli: &Cli) -> Result<TranscriptParser<SourceLoader>> {
    let loader = SourceLoader::with_timeout(cli.http_timeout()).context("failed to set up HTTP client")?;
    Ok(TranscriptParser::new(loader))
}

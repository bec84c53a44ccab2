//! View command - stored lines of one transcript, a page at a time

use anyhow::{bail, Result};
use transcript_db::{LineCriteria, TranscriptStore};

use crate::cli::{Cli, OutputFormat};
use crate::output::{human, json, minimal};

pub fn run(cli: &Cli, store: &TranscriptStore, source: &str, page: u32) -> Result<()> {
    if store.source(source)?.is_none() {
        bail!("Source not imported: {} (run: transcript import {})", source, source);
    }

    let page = store.paginate(&LineCriteria::for_source(source), page, cli.per_page)?;

    match cli.format {
        OutputFormat::Human => {
            for line in &page.items {
                println!("{}", human::format_stored(line, false));
            }
            if page.items.is_empty() {
                eprintln!("No lines on page {}", page.page);
            }
            println!();
            println!("{}", human::format_page_footer(&page));
        }
        OutputFormat::Json => json::print_value(&json::page_to_json(&page), cli.pretty),
        OutputFormat::Minimal => {
            for line in &page.items {
                println!("{}", minimal::format_stored(line));
            }
        }
    }

    Ok(())
}

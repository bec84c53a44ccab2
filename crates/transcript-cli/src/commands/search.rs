//! Search command - text search across stored lines

use anyhow::Result;
use colored::Colorize;
use transcript_db::{LineCriteria, TranscriptStore};

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json, minimal};

pub fn run(
    cli: &Cli,
    store: &TranscriptStore,
    query: &str,
    source: Option<&str>,
    page: u32,
) -> Result<()> {
    let mut criteria = LineCriteria::new().with_search(query);
    criteria.source = source.map(str::to_string);

    let page = store.paginate(&criteria, page, cli.per_page)?;

    match cli.format {
        OutputFormat::Human => {
            if page.total == 0 {
                println!("No results found for: {}", query.cyan());
                return Ok(());
            }

            println!(
                "{}",
                colors::header(&format!("Search results for '{}' ({})", query, page.total))
            );
            println!();
            for line in &page.items {
                println!("{}", human::format_stored(line, source.is_none()));
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

//! Stats command - database statistics

use anyhow::Result;
use serde_json::json;
use transcript_db::TranscriptStore;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json};

pub fn run(cli: &Cli, store: &TranscriptStore) -> Result<()> {
    let stats = store.stats()?;

    match cli.format {
        OutputFormat::Human => {
            println!("{}", colors::header("Transcript Database"));
            println!();
            println!("{}", human::format_stats(&stats));
        }
        OutputFormat::Json => json::print_value(
            &json!({
                "db_path": stats.db_path.as_ref().map(|p| p.display().to_string()),
                "db_size_bytes": stats.db_size_bytes,
                "version": stats.version,
                "source_count": stats.source_count,
                "line_count": stats.line_count,
                "invalid_count": stats.invalid_count,
                "last_imported": stats.last_imported,
            }),
            cli.pretty,
        ),
        OutputFormat::Minimal => println!("{}", stats.line_count),
    }

    Ok(())
}

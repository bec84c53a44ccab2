//! Sources command - list imported transcripts

use anyhow::Result;
use transcript_db::TranscriptStore;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json, minimal};

pub fn run(cli: &Cli, store: &TranscriptStore) -> Result<()> {
    let sources = store.sources()?;

    match cli.format {
        OutputFormat::Human => {
            if sources.is_empty() {
                println!("No transcripts imported");
            } else {
                println!(
                    "{}",
                    colors::header(&format!("Sources ({})", sources.len()))
                );
                println!();
                for info in &sources {
                    println!("{}", human::format_source(info));
                }
            }
        }
        OutputFormat::Json => {
            let values: Vec<_> = sources.iter().map(json::source_to_json).collect();
            json::print_all(&values, cli.pretty);
        }
        OutputFormat::Minimal => {
            for info in &sources {
                println!("{}", minimal::format_source(info));
            }
        }
    }

    Ok(())
}

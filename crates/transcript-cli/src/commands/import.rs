//! Import command - parse transcripts and store their lines

use anyhow::{bail, Result};
use serde_json::json;
use tracing::error;
use transcript_db::TranscriptStore;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json};

pub fn run(cli: &Cli, store: &mut TranscriptStore, sources: &[String]) -> Result<()> {
    let parser = super::build_parser(cli)?;
    let mut failures = 0usize;
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        // A bad source doesn't stop the rest of the batch
        let outcome = parser
            .parse(source)
            .map_err(anyhow::Error::from)
            .and_then(|result| {
                store.save(source, &result)?;
                Ok(result)
            });

        match outcome {
            Ok(result) => {
                let summary = result.summary();
                match cli.format {
                    OutputFormat::Human => {
                        println!("{}", colors::success(&human::format_summary(source, &summary)));
                    }
                    OutputFormat::Json => reports.push(json!({
                        "source": source,
                        "lines": summary.lines,
                        "invalid": summary.invalid,
                    })),
                    OutputFormat::Minimal => println!("{}", source),
                }
            }
            Err(e) => {
                failures += 1;
                error!(source = source.as_str(), error = %e, "import failed");
                match cli.format {
                    OutputFormat::Json => reports.push(json!({
                        "source": source,
                        "error": e.to_string(),
                    })),
                    _ => eprintln!("{}", colors::error(&format!("{}: {:#}", source, e))),
                }
            }
        }
    }

    if cli.format == OutputFormat::Json {
        json::print_all(&reports, cli.pretty);
    }

    if failures > 0 {
        bail!("{} of {} sources failed to import", failures, sources.len());
    }

    Ok(())
}

//! Parse command - print the lines of a transcript without storing them

use anyhow::{Context, Result};
use serde_json::json;
use transcript_core::{filter_lines, FilterOptions};

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json, minimal};

pub fn run(
    cli: &Cli,
    source: &str,
    search: Option<&str>,
    from: Option<u64>,
    to: Option<u64>,
    show_invalid: bool,
) -> Result<()> {
    let parser = super::build_parser(cli)?;
    let result = parser
        .parse(source)
        .with_context(|| format!("failed to parse {}", source))?;

    let mut options = FilterOptions::new().with_window(from, to);
    if let Some(s) = search {
        options = options.with_search(s);
    }
    let lines = filter_lines(&result.lines, &options);

    match cli.format {
        OutputFormat::Human => {
            println!("{}", human::format_summary(source, &result.summary()));
            println!();
            for line in &lines {
                println!("{}", human::format_line(line));
            }
            if lines.is_empty() && !options.is_empty() {
                eprintln!("No lines found matching criteria");
            }

            if show_invalid && !result.invalid_lines.is_empty() {
                println!();
                println!(
                    "{}",
                    colors::header(&format!(
                        "Lines without player link ({})",
                        result.invalid_lines.len()
                    ))
                );
                println!();
                for raw in &result.invalid_lines {
                    println!("{}", colors::warning(raw));
                }
            }
        }
        OutputFormat::Json => {
            let values: Vec<_> = lines.iter().map(|l| json::line_to_json(l)).collect();
            if show_invalid {
                json::print_value(
                    &json!({ "lines": values, "invalid_lines": result.invalid_lines }),
                    cli.pretty,
                );
            } else {
                json::print_all(&values, cli.pretty);
            }
        }
        OutputFormat::Minimal => {
            for line in &lines {
                println!("{}", minimal::format_line(line));
            }
            if show_invalid {
                for raw in &result.invalid_lines {
                    eprintln!("{}", raw);
                }
            }
        }
    }

    Ok(())
}

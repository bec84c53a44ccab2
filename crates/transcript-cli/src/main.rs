//! transcript-cli - CLI for parsing, importing and browsing show transcripts

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use transcript_db::{default_db_path, TranscriptStore};

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::colors::init();

    let db_path = cli.db_path.clone().unwrap_or_else(default_db_path);

    // Commands that parse sources; import is the only writer
    match &cli.command {
        Command::Parse {
            source,
            search,
            from,
            to,
            invalid,
        } => {
            return commands::parse::run(&cli, source, search.as_deref(), *from, *to, *invalid);
        }
        Command::Import { sources } => {
            let mut store = TranscriptStore::open_or_create(&db_path)?;
            return commands::import::run(&cli, &mut store, sources);
        }
        _ => {}
    }

    // Query commands read an existing database
    let store = TranscriptStore::open(&db_path)?;

    match &cli.command {
        Command::View { source, page } => commands::view::run(&cli, &store, source, *page),

        Command::Search {
            query,
            source,
            page,
        } => commands::search::run(&cli, &store, query, source.as_deref(), *page),

        Command::Sources => commands::sources::run(&cli, &store),

        Command::Stats => commands::stats::run(&cli, &store),

        // All other commands handled above
        _ => unreachable!(),
    }
}

/// Log to stderr so stdout stays parseable; `--verbose` wins over RUST_LOG
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

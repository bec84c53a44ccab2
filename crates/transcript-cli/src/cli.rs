//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// CLI for parsing and browsing show transcripts
#[derive(Parser, Debug)]
#[command(name = "transcript")]
#[command(version)]
#[command(about = "Parse, import and browse naplay.it show transcripts")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Custom database path
    #[arg(long, global = true, env = "TRANSCRIPT_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Pretty-print JSON output as a single array
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Timeout for HTTP sources, in seconds
    #[arg(long, global = true, env = "TRANSCRIPT_HTTP_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Lines per page for stored queries
    #[arg(long, global = true, env = "TRANSCRIPT_PER_PAGE", default_value = "50")]
    pub per_page: u32,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output (one object per line for lists)
    Json,
    /// Minimal text output (text only)
    Minimal,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a transcript and print its lines without storing them
    Parse {
        /// File path, file:// URI or http(s) URL
        source: String,

        /// Only lines containing this text
        #[arg(long, short)]
        search: Option<String>,

        /// Only lines at or after this many seconds
        #[arg(long)]
        from: Option<u64>,

        /// Only lines at or before this many seconds
        #[arg(long)]
        to: Option<u64>,

        /// Also list lines that had no player link
        #[arg(long)]
        invalid: bool,
    },

    /// Parse transcripts and store their lines
    Import {
        /// File paths, file:// URIs or http(s) URLs
        #[arg(required = true)]
        sources: Vec<String>,
    },

    /// Show stored lines of one transcript, a page at a time
    View {
        /// Source the transcript was imported from
        source: String,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Search stored lines
    Search {
        /// Text to look for
        query: String,

        /// Restrict to one source
        #[arg(short, long)]
        source: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// List imported transcripts
    Sources,

    /// Show database statistics
    Stats,
}

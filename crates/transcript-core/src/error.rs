//! Error types for transcript loading and parsing

use thiserror::Error;

/// A transcript document could not be fetched or read
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {locator}: {error}")]
    Io {
        locator: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to fetch {locator}: {error}")]
    Http {
        locator: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("Failed to fetch {locator}: HTTP {status}")]
    Status { locator: String, status: u16 },

    #[error("No in-memory document for {0}")]
    Missing(String),
}

impl LoadError {
    /// Identifier of the source that failed to load
    pub fn locator(&self) -> &str {
        match self {
            LoadError::Io { locator, .. }
            | LoadError::Http { locator, .. }
            | LoadError::Status { locator, .. }
            | LoadError::Missing(locator) => locator,
        }
    }
}

/// A loaded document does not have the outline structure of a transcript
#[derive(Error, Debug)]
pub enum StructureError {
    #[error("Document is not UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Malformed document: {0}")]
    Malformed(#[from] roxmltree::Error),

    #[error("Document has no <{0}> element where one is required")]
    MissingElement(&'static str),
}

/// Fatal outcome of parsing one transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid transcript {locator}: {error}")]
    Structure {
        locator: String,
        #[source]
        error: StructureError,
    },
}

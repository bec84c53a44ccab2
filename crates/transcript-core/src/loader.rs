//! Document loading for transcript sources
//!
//! The parser never touches the filesystem or network itself; it asks a
//! [`DocumentLoader`] for the bytes behind a source identifier.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::LoadError;

/// Default timeout for HTTP sources
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolves a source identifier to raw document bytes
pub trait DocumentLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>, LoadError>;
}

impl<L: DocumentLoader + ?Sized> DocumentLoader for &L {
    fn load(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        (**self).load(source)
    }
}

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl DocumentLoader for FileLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        let path = source.strip_prefix("file://").unwrap_or(source);
        debug!(path, "reading transcript file");
        std::fs::read(path).map_err(|error| LoadError::Io {
            locator: source.to_string(),
            error,
        })
    }
}

/// Fetches documents over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: Client,
}

impl HttpLoader {
    /// Loader whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl DocumentLoader for HttpLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        debug!(url = source, "fetching transcript");
        let response = self.client.get(source).send().map_err(|error| LoadError::Http {
            locator: source.to_string(),
            error,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = source, status = status.as_u16(), "transcript fetch failed");
            return Err(LoadError::Status {
                locator: source.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|error| LoadError::Http {
            locator: source.to_string(),
            error,
        })?;
        Ok(body.to_vec())
    }
}

/// Sends `http://` and `https://` sources to an [`HttpLoader`], everything
/// else to a [`FileLoader`]
#[derive(Debug, Clone)]
pub struct SourceLoader {
    file: FileLoader,
    http: HttpLoader,
}

impl SourceLoader {
    pub fn new(http: HttpLoader) -> Self {
        Self {
            file: FileLoader,
            http,
        }
    }

    /// Loader with the given HTTP timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::new(HttpLoader::new(timeout)?))
    }
}

impl DocumentLoader for SourceLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        if is_remote(source) {
            self.http.load(source)
        } else {
            self.file.load(source)
        }
    }
}

/// Whether a source is fetched over the network
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Documents held in memory, keyed by source identifier
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(source.into(), content.into());
    }

    pub fn with_document(mut self, source: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(source, content);
        self
    }
}

impl DocumentLoader for MemoryLoader {
    fn load(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        self.documents
            .get(source)
            .cloned()
            .ok_or_else(|| LoadError::Missing(source.to_string()))
    }
}

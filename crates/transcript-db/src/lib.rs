//! transcript-db - SQLite storage for parsed transcript lines
//!
//! Stores the lines produced by `transcript-core` per source document and
//! serves them back with a default ordering and page-based pagination.

pub mod connection;
pub mod queries;
pub mod schema;
pub mod sources;

pub use connection::*;
pub use queries::*;
pub use schema::{init_schema, DB_VERSION};
pub use sources::SourceInfo;

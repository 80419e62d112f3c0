use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the JSON files under the data directory.
///
/// At startup these abort the process; at runtime they are logged and the in-memory
/// state stays authoritative.
#[derive(Error, Debug)]
pub enum DataError {
    /// File could not be read, written or renamed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid JSON for the expected shape.
    #[error("Malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File parsed but holds a Discord id of 0 in the named field.
    #[error("Invalid id 0 for '{field}' in {}", .path.display())]
    ZeroId { path: PathBuf, field: String },
}

//! JSON file helpers shared by the repositories.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};

use crate::server::error::data::DataError;

/// Reads and deserializes a JSON file.
///
/// # Arguments
/// - `path` - File to read
///
/// # Returns
/// - `Ok(Some(T))` - File exists and holds valid JSON for `T`
/// - `Ok(None)` - File does not exist
/// - `Err(DataError)` - File could not be read or is malformed
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DataError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(DataError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Serializes `value` as pretty JSON and replaces `path` with it.
///
/// The content is written to a sibling temporary file first and renamed over the
/// target, so a crash mid-write never leaves a truncated file behind.
pub async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), DataError> {
    let json = serde_json::to_vec_pretty(value).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| DataError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let temp = temp_path(path);
    tokio::fs::write(&temp, json)
        .await
        .map_err(|source| DataError::Io {
            path: temp.clone(),
            source,
        })?;

    tokio::fs::rename(&temp, path)
        .await
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::{
    builder::{SETTINGS_FILE, STATE_FILE},
    error::TestError,
};

/// Test context owning an isolated data directory.
///
/// The directory is a `TempDir` under the system temp directory and is removed when
/// the context is dropped, so tests never see each other's files.
pub struct TestContext {
    data_dir: TempDir,
}

impl TestContext {
    /// Creates a new empty data directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning the new directory
    /// - `Err(TestError::Io)` - The directory could not be created
    pub fn new() -> Result<Self, TestError> {
        let data_dir = tempfile::Builder::new()
            .prefix("ssu-announcer-test-")
            .tempdir()?;

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir().join(SETTINGS_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir().join(STATE_FILE)
    }

    /// Writes a JSON document into the data directory.
    pub fn write_json(&self, name: &str, value: &Value) -> Result<(), TestError> {
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(self.data_dir().join(name), content)?;
        Ok(())
    }

    /// Reads a JSON document back from the data directory.
    ///
    /// # Returns
    /// - `Ok(Some(Value))` - The parsed document
    /// - `Ok(None)` - The file does not exist
    /// - `Err(TestError)` - The file is unreadable or not JSON
    pub fn read_json(&self, name: &str) -> Result<Option<Value>, TestError> {
        let path = self.data_dir().join(name);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Reads `state.json` back, the most common assertion target.
    pub fn read_state(&self) -> Result<Option<Value>, TestError> {
        self.read_json(STATE_FILE)
    }

    pub fn read_settings(&self) -> Result<Option<Value>, TestError> {
        self.read_json(SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contexts_get_separate_directories() {
        let first = TestContext::new().unwrap();
        let second = TestContext::new().unwrap();

        assert!(first.data_dir().is_dir());
        assert_ne!(first.data_dir(), second.data_dir());
    }

    #[test]
    fn data_directory_is_removed_on_drop() {
        let context = TestContext::new().unwrap();
        context
            .write_json(STATE_FILE, &serde_json::json!({ "polls": [] }))
            .unwrap();
        let data_dir = context.data_dir().to_path_buf();

        drop(context);

        assert!(!data_dir.exists());
    }
}

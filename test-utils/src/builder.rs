use serde_json::Value;

use crate::{context::TestContext, error::TestError};

/// File name the bot reads its settings from.
pub const SETTINGS_FILE: &str = "settings.json";

/// File name the bot persists its status and polls to.
pub const STATE_FILE: &str = "state.json";

/// Builder for creating test contexts with seeded data files.
///
/// Provides a fluent interface for configuring the documents present in the data
/// directory before the code under test loads it. Files that are not seeded are
/// simply absent, which is how first start-up is exercised.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::{builder::TestBuilder, fixture};
///
/// let test = TestBuilder::new()
///     .with_settings(fixture::settings::configured())
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// Document written to `settings.json`.
    settings: Option<Value>,

    /// Document written to `state.json`.
    state: Option<Value>,

    /// Raw files written verbatim, for malformed-input tests.
    raw_files: Vec<(String, String)>,
}

impl TestBuilder {
    /// Creates a new test builder with no files configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance seeding an empty data directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `settings.json` with the given document.
    ///
    /// # Arguments
    /// - `settings` - JSON document to write
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Seeds `state.json` with the given document.
    ///
    /// # Arguments
    /// - `state` - JSON document to write, current or legacy layout
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Writes a file with arbitrary content into the data directory.
    ///
    /// # Arguments
    /// - `name` - File name relative to the data directory
    /// - `content` - Content written as is
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_raw_file(mut self, name: &str, content: &str) -> Self {
        self.raw_files.push((name.to_string(), content.to_string()));
        self
    }

    /// Builds the test context and writes all seeded files.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context owning a fresh data directory with the files in place
    /// - `Err(TestError)` - The directory or one of the files could not be written
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        if let Some(settings) = self.settings {
            context.write_json(SETTINGS_FILE, &settings)?;
        }

        if let Some(state) = self.state {
            context.write_json(STATE_FILE, &state)?;
        }

        for (name, content) in self.raw_files {
            std::fs::write(context.data_dir().join(name), content)?;
        }

        Ok(context)
    }
}

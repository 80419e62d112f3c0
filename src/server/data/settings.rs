use std::path::{Path, PathBuf};

use crate::server::{
    data::file::{read_json, write_json_atomic},
    error::data::DataError,
    model::settings::Settings,
};

pub const SETTINGS_FILE: &str = "settings.json";

/// Loads and saves `settings.json` in the data directory.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SETTINGS_FILE),
        }
    }

    /// Loads the settings, writing defaults when the file does not exist yet.
    ///
    /// # Returns
    /// - `Ok(Settings)` - Stored settings, or defaults when the file was missing
    /// - `Err(DataError::ZeroId)` - A channel, guild or admin id is 0
    /// - `Err(DataError)` - The file exists but is unreadable or malformed, or the
    ///   default file could not be written
    pub async fn load_or_create(&self) -> Result<Settings, DataError> {
        if let Some(settings) = read_json::<Settings>(&self.path).await? {
            if let Some(field) = settings.first_zero_id() {
                return Err(DataError::ZeroId {
                    path: self.path.clone(),
                    field: field.to_string(),
                });
            }
            return Ok(settings);
        }

        tracing::warn!(
            "Settings file {} not found, created one with default values. Configure the announcement channels before use.",
            self.path.display()
        );

        let settings = Settings::default();
        self.save(&settings).await?;

        Ok(settings)
    }

    /// Replaces the stored settings.
    pub async fn save(&self, settings: &Settings) -> Result<(), DataError> {
        write_json_atomic(&self.path, settings).await
    }
}

use std::path::PathBuf;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Process configuration read from the environment.
///
/// Everything an admin can change at runtime lives in `settings.json` instead; the
/// environment only carries the bot credential and where the data files are.
pub struct Config {
    pub discord_bot_token: String,

    /// Directory holding `settings.json` and `state.json`.
    pub data_dir: PathBuf,

    /// Prefix chat commands start with.
    pub command_prefix: String,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables are present
    /// - `Err(AppError::ConfigErr(MissingEnvVar))` - `DISCORD_BOT_TOKEN` is not set
    /// - `Err(AppError::ConfigErr(InvalidEnvVar))` - `COMMAND_PREFIX` is blank
    pub fn from_env() -> Result<Self, AppError> {
        let discord_bot_token = std::env::var("DISCORD_BOT_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let command_prefix = match std::env::var("COMMAND_PREFIX") {
            Ok(prefix) if prefix.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar {
                    name: "COMMAND_PREFIX".to_string(),
                    reason: "must not be blank".to_string(),
                }
                .into())
            }
            Ok(prefix) => prefix.trim().to_string(),
            Err(_) => DEFAULT_COMMAND_PREFIX.to_string(),
        };

        Ok(Self {
            discord_bot_token,
            data_dir,
            command_prefix,
        })
    }
}

use thiserror::Error;

use crate::server::model::settings::AnnouncementChannel;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation or `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but its value cannot be used.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Variable name
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// A setting change was rejected.
    ///
    /// Results in a 400 Bad Request with the reason returned to the client.
    #[error("Invalid value for setting '{setting}': {reason}")]
    InvalidSetting {
        /// Setting name as used by the `config` command
        setting: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The announcement channel an operation posts to has not been configured.
    ///
    /// Results in a 503 Service Unavailable until an admin sets the channel.
    #[error("{0} channel is not configured")]
    ChannelNotConfigured(AnnouncementChannel),
}

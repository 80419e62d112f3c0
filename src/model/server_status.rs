use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current status of the announced server.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ServerStatusDto {
    pub is_running: bool,
    pub server_name: Option<String>,
    pub host: Option<String>,
    pub ping: Option<String>,
    pub description: Option<String>,
    pub started_by: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

/// Body of `POST /ssu`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct StartServerDto {
    pub server_name: String,
    /// Host display name or `<@id>` mention.
    pub host: String,
    /// `@everyone`, `@here`, a `<@&id>` role mention or a role name.
    pub ping: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `POST /ssd`: the session that was shut down.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ShutdownDto {
    /// Status of the session right before shutdown.
    pub session: ServerStatusDto,
    pub shutdown_by: String,
    pub shutdown_at: DateTime<Utc>,
}

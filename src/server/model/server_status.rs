//! Domain models for the announced game server session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::server_status::{ServerStatusDto, ShutdownDto, StartServerDto},
    server::util::parse::{normalize_role_ping, parse_user_mention, UserMention},
};

/// Status of the single announced game server.
///
/// The default value is the idle status; shutting a session down resets the status
/// back to exactly this value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerStatus {
    pub is_running: bool,
    pub server_name: Option<String>,
    /// Display name of the host running the session.
    pub host: Option<String>,
    /// Ping target posted with the startup announcement.
    pub ping: Option<String>,
    pub description: Option<String>,
    /// Display name of whoever announced the startup.
    pub started_by: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl ServerStatus {
    /// Converts the status to its REST representation.
    pub fn into_dto(self) -> ServerStatusDto {
        ServerStatusDto {
            is_running: self.is_running,
            server_name: self.server_name,
            host: self.host,
            ping: self.ping,
            description: self.description,
            started_by: self.started_by,
            started_at: self.started_at,
        }
    }
}

/// Parameters for announcing a server startup.
#[derive(Debug, Clone)]
pub struct StartServerParams {
    pub server_name: String,
    pub host: String,
    pub ping: String,
    pub description: Option<String>,
    pub started_by: String,
}

impl StartServerParams {
    /// Converts a REST request into startup parameters.
    ///
    /// REST clients have no guild cache behind them, so a role name stays as `@name`
    /// and a host mention is kept as a mention.
    ///
    /// # Arguments
    /// - `dto` - Request body
    /// - `started_by` - Name of the API client issuing the request
    pub fn from_dto(dto: StartServerDto, started_by: String) -> Self {
        let host = match parse_user_mention(&dto.host) {
            UserMention::Id(id) => format!("<@{}>", id),
            UserMention::Name(name) => name,
        };

        Self {
            server_name: dto.server_name.trim().to_string(),
            host,
            ping: normalize_role_ping(&dto.ping, |_| None),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            started_by,
        }
    }
}

/// A session that has just been shut down.
#[derive(Debug, Clone, PartialEq)]
pub struct EndedSession {
    /// Status of the session right before shutdown.
    pub session: ServerStatus,
    /// Display name of whoever announced the shutdown.
    pub shutdown_by: String,
    pub shutdown_at: DateTime<Utc>,
}

impl EndedSession {
    pub fn into_dto(self) -> ShutdownDto {
        ShutdownDto {
            session: self.session.into_dto(),
            shutdown_by: self.shutdown_by,
            shutdown_at: self.shutdown_at,
        }
    }
}

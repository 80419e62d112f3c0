use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PollDto {
    pub id: u64,
    pub server_name: String,
    pub created_by: String,
    pub role_target: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub target_time: DateTime<Utc>,
    /// `active`, `expired`, `cancelled` or `completed`.
    pub state: String,
    /// Seconds until the target time, negative once overdue.
    pub remaining_seconds: i64,
    /// Remaining time as shown in the poll message, e.g. `1h 30min`.
    pub remaining: String,
    #[serde(with = "crate::model::id::option", default)]
    #[schema(value_type = Option<String>)]
    pub channel_id: Option<u64>,
    #[serde(with = "crate::model::id::option", default)]
    #[schema(value_type = Option<String>)]
    pub message_id: Option<u64>,
}

/// Body of `POST /ssup`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct CreatePollDto {
    pub server_name: String,
    /// Compact duration such as `45min` or `1d12h30min`.
    pub duration: String,
    #[serde(default)]
    pub role_target: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response of `POST /polls/{id}/refresh`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RefreshPollDto {
    pub poll: PollDto,
    pub remaining_seconds: i64,
    pub overdue: bool,
    /// Events emitted by the refresh: `nearing_expiry`, `due` or `expired`.
    pub events: Vec<String>,
}

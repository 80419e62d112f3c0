use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::server::{
    data::file::{read_json, write_json_atomic},
    error::data::DataError,
    model::{
        poll::{Poll, PollId, PollMessage, PollState},
        server_status::ServerStatus,
    },
};

pub const STATE_FILE: &str = "state.json";

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01).
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Everything `state.json` stores: the server status, the polls and the id counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    pub status: ServerStatus,
    pub polls: Vec<Poll>,
    pub next_poll_id: u64,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            status: ServerStatus::default(),
            polls: Vec::new(),
            next_poll_id: 1,
        }
    }
}

/// Loads and saves `state.json` in the data directory.
#[derive(Debug, Clone)]
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted state.
    ///
    /// Files written by earlier releases of the bot are recognised and converted; the
    /// converted state is written back immediately in the current format. A poll whose
    /// message reference holds an id of 0 keeps running without a message.
    ///
    /// # Returns
    /// - `Ok(StateSnapshot)` - Stored state, or the empty state when no file exists
    /// - `Err(DataError)` - The file is unreadable or not valid JSON
    pub async fn load(&self) -> Result<StateSnapshot, DataError> {
        let Some(value) = read_json::<Value>(&self.path).await? else {
            return Ok(StateSnapshot::default());
        };

        if is_legacy(&value) {
            let snapshot = migrate_legacy(value, Utc::now()).map_err(|source| DataError::Json {
                path: self.path.clone(),
                source,
            })?;
            tracing::info!(
                "Migrated legacy state file {} ({} polls)",
                self.path.display(),
                snapshot.polls.len()
            );
            self.save(&snapshot).await?;
            return Ok(snapshot);
        }

        let mut snapshot: StateSnapshot =
            serde_json::from_value(value).map_err(|source| DataError::Json {
                path: self.path.clone(),
                source,
            })?;
        detach_zero_messages(&mut snapshot);

        Ok(snapshot)
    }

    /// Replaces the stored state.
    pub async fn save(&self, snapshot: &StateSnapshot) -> Result<(), DataError> {
        write_json_atomic(&self.path, snapshot).await
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacySession {
    server_name: Option<String>,
    host: Option<String>,
    ping: Option<String>,
    description: Option<String>,
    timestamp: Option<String>,
    user: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyCommandState {
    can_use_ssd: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyPoll {
    server_name: Option<String>,
    target_time: Option<String>,
    created_by: Option<String>,
    channel_id: Option<Value>,
    role_ping: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyState {
    last_ssu_data: Option<LegacySession>,
    command_state: Option<LegacyCommandState>,
    active_polls: serde_json::Map<String, Value>,
}

fn is_legacy(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    ["last_ssu_data", "active_polls", "server_name"]
        .iter()
        .any(|key| object.contains_key(*key))
}

/// Converts a legacy state document into the current snapshot.
///
/// Two legacy layouts exist: a nested one with `last_ssu_data`, `command_state` and
/// `active_polls`, and an older flat one holding only the session fields. Naive
/// timestamps are read as UTC. Polls whose target time cannot be read are dropped.
pub(crate) fn migrate_legacy(
    value: Value,
    now: DateTime<Utc>,
) -> Result<StateSnapshot, serde_json::Error> {
    let is_flat = value
        .as_object()
        .is_some_and(|object| object.contains_key("server_name"));

    let legacy: LegacyState = if is_flat {
        LegacyState {
            last_ssu_data: Some(serde_json::from_value(value)?),
            ..LegacyState::default()
        }
    } else {
        serde_json::from_value(value)?
    };

    let session = legacy.last_ssu_data.unwrap_or_default();
    let is_running = legacy
        .command_state
        .and_then(|state| state.can_use_ssd)
        .unwrap_or_else(|| session.server_name.is_some());

    let status = if is_running {
        ServerStatus {
            is_running: true,
            server_name: session.server_name,
            host: session.host,
            ping: session.ping,
            description: session.description,
            started_by: session.user,
            started_at: session.timestamp.as_deref().and_then(parse_timestamp),
        }
    } else {
        ServerStatus::default()
    };

    let mut entries: Vec<(u64, LegacyPoll)> = Vec::new();
    for (key, raw) in legacy.active_polls {
        let Some(message_id) = key.parse::<u64>().ok().filter(|id| *id != 0) else {
            tracing::warn!("Dropping legacy poll with invalid message id '{}'", key);
            continue;
        };
        entries.push((message_id, serde_json::from_value(raw)?));
    }
    entries.sort_by_key(|(message_id, _)| *message_id);

    let mut polls = Vec::new();
    for (message_id, legacy_poll) in entries {
        let Some(target_time) = legacy_poll.target_time.as_deref().and_then(parse_timestamp)
        else {
            tracing::warn!("Dropping legacy poll {} without a readable target time", message_id);
            continue;
        };

        let created_at = snowflake_time(message_id)
            .filter(|created| *created < target_time)
            .unwrap_or_else(|| now.min(target_time - TimeDelta::seconds(1)));

        let id = PollId(polls.len() as u64 + 1);
        polls.push(Poll {
            id,
            server_name: legacy_poll
                .server_name
                .unwrap_or_else(|| "Unknown".to_string()),
            created_by: legacy_poll.created_by.unwrap_or_default(),
            role_target: legacy_poll.role_ping,
            description: legacy_poll.description,
            created_at,
            target_time,
            state: PollState::Active,
            closed_at: None,
            threshold_notified: false,
            due_notified: false,
            message: legacy_poll
                .channel_id
                .as_ref()
                .and_then(value_as_id)
                .filter(|channel_id| *channel_id != 0)
                .map(|channel_id| PollMessage {
                    channel_id,
                    message_id,
                }),
        });
    }

    Ok(StateSnapshot {
        status,
        next_poll_id: polls.len() as u64 + 1,
        polls,
    })
}

/// Drops poll message references Discord could never have produced.
fn detach_zero_messages(snapshot: &mut StateSnapshot) {
    for poll in &mut snapshot.polls {
        if poll
            .message
            .is_some_and(|message| message.channel_id == 0 || message.message_id == 0)
        {
            tracing::warn!("Poll {} references a message with id 0, detaching it", poll.id);
            poll.message = None;
        }
    }
}

/// Parses RFC 3339 timestamps and the naive `YYYY-MM-DD HH:MM:SS[.ffffff]` form.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Creation time encoded in a Discord snowflake id.
fn snowflake_time(id: u64) -> Option<DateTime<Utc>> {
    let millis = (id >> 22).checked_add(DISCORD_EPOCH_MS)?;
    DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
}

fn value_as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

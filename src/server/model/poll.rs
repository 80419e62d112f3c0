//! Domain models for server startup polls.
//!
//! Defines the poll record owned by the poll registry, its lifecycle states, the
//! countdown configuration and the events produced while a poll counts down.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    model::{
        poll::{CreatePollDto, PollDto, RefreshPollDto},
        settings::{PollConfigDto, UpdatePollConfigDto},
    },
    server::util::{parse::normalize_role_ping, time::format_remaining},
};

/// Identifier of a poll, unique for the lifetime of the state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollId(pub u64);

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a poll.
///
/// `Active` is the only state that allows mutation; every other state is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollState {
    Active,
    Expired,
    Cancelled,
    Completed,
}

impl PollState {
    pub fn is_terminal(self) -> bool {
        self != PollState::Active
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PollState::Active => "active",
            PollState::Expired => "expired",
            PollState::Cancelled => "cancelled",
            PollState::Completed => "completed",
        }
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discord message that displays a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollMessage {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Server startup poll counting down to a target time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    /// Unique identifier of the poll.
    pub id: PollId,
    /// Name of the server the poll asks to start.
    pub server_name: String,
    /// Display name of whoever created the poll.
    pub created_by: String,
    /// Ping target shown above the poll, already normalised for posting.
    pub role_target: Option<String>,
    /// Optional free text shown in the poll embed.
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Moment the poll closes. Always later than `created_at`.
    pub target_time: DateTime<Utc>,
    pub state: PollState,
    /// When the poll left the `Active` state.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    /// Whether the nearing-expiry notice was already emitted.
    #[serde(default)]
    pub threshold_notified: bool,
    /// Whether the overdue notice was already emitted for a poll kept active past
    /// its target time.
    #[serde(default)]
    pub due_notified: bool,
    /// Message displaying the poll once it has been posted.
    #[serde(default)]
    pub message: Option<PollMessage>,
}

impl Poll {
    /// Time left until the target, negative once the poll is overdue.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.target_time - now
    }

    pub fn is_active(&self) -> bool {
        self.state == PollState::Active
    }

    /// Moves the poll into a terminal state.
    ///
    /// Callers check `is_active` first; the registry is the only place that calls this.
    pub(crate) fn close(&mut self, state: PollState, now: DateTime<Utc>) {
        self.state = state;
        self.closed_at = Some(now);
    }

    /// Converts the poll to its REST representation with the remaining time at `now`.
    pub fn into_dto(self, now: DateTime<Utc>) -> PollDto {
        PollDto {
            id: self.id.0,
            remaining_seconds: self.remaining(now).num_seconds(),
            remaining: format_remaining(self.target_time, now),
            server_name: self.server_name,
            created_by: self.created_by,
            role_target: self.role_target,
            description: self.description,
            created_at: self.created_at,
            target_time: self.target_time,
            state: self.state.to_string(),
            channel_id: self.message.map(|m| m.channel_id),
            message_id: self.message.map(|m| m.message_id),
        }
    }
}

/// Parameters for creating a poll.
#[derive(Debug, Clone)]
pub struct CreatePollParams {
    pub server_name: String,
    /// Compact duration expression such as `45min` or `1d12h`.
    pub duration_expr: String,
    pub role_target: Option<String>,
    pub description: Option<String>,
    pub created_by: String,
}

impl CreatePollParams {
    /// Converts a REST request into poll parameters.
    ///
    /// # Arguments
    /// - `dto` - Request body
    /// - `created_by` - Name of the API client issuing the request
    pub fn from_dto(dto: CreatePollDto, created_by: String) -> Self {
        Self {
            server_name: dto.server_name,
            duration_expr: dto.duration,
            role_target: dto
                .role_target
                .filter(|target| !target.trim().is_empty())
                .map(|target| normalize_role_ping(&target, |_| None)),
            description: dto.description.filter(|d| !d.trim().is_empty()),
            created_by,
        }
    }
}

/// Process-wide countdown tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between two countdown cycles.
    pub update_interval_seconds: u64,
    /// Close polls automatically once their target time is reached.
    pub auto_cancel: bool,
    /// Minutes before the target at which the nearing-expiry notice fires. Zero
    /// disables the notice.
    pub notification_threshold_minutes: u64,
    /// Maximum number of polls that may be active at once.
    pub max_active_polls: usize,
}

pub const DEFAULT_UPDATE_INTERVAL_SECONDS: u64 = 60;
pub const DEFAULT_NOTIFICATION_THRESHOLD_MINUTES: u64 = 5;
pub const DEFAULT_MAX_ACTIVE_POLLS: usize = 10;

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            update_interval_seconds: DEFAULT_UPDATE_INTERVAL_SECONDS,
            auto_cancel: true,
            notification_threshold_minutes: DEFAULT_NOTIFICATION_THRESHOLD_MINUTES,
            max_active_polls: DEFAULT_MAX_ACTIVE_POLLS,
        }
    }
}

impl PollConfig {
    pub fn into_dto(self) -> PollConfigDto {
        PollConfigDto {
            update_interval_seconds: self.update_interval_seconds,
            auto_cancel: self.auto_cancel,
            notification_threshold_minutes: self.notification_threshold_minutes,
            max_active_polls: self.max_active_polls,
        }
    }
}

/// Partial update of the poll configuration; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePollConfigParams {
    pub update_interval_seconds: Option<u64>,
    pub auto_cancel: Option<bool>,
    pub notification_threshold_minutes: Option<u64>,
    pub max_active_polls: Option<usize>,
}

impl UpdatePollConfigParams {
    pub fn from_dto(dto: UpdatePollConfigDto) -> Self {
        Self {
            update_interval_seconds: dto.update_interval_seconds,
            auto_cancel: dto.auto_cancel,
            notification_threshold_minutes: dto.notification_threshold_minutes,
            max_active_polls: dto.max_active_polls,
        }
    }
}

/// Event produced when a poll is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent {
    /// Remaining time dropped below the notification threshold.
    NearingExpiry,
    /// Target time reached while the poll stays active (auto-cancel disabled).
    Due,
    /// Target time reached and the poll was closed as expired.
    Expired,
}

impl PollEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            PollEvent::NearingExpiry => "nearing_expiry",
            PollEvent::Due => "due",
            PollEvent::Expired => "expired",
        }
    }
}

/// Result of a manual refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    /// Poll as stored after the refresh.
    pub poll: Poll,
    /// Seconds left until the target; zero or negative when overdue.
    pub remaining_seconds: i64,
    /// Target time has been reached.
    pub overdue: bool,
    /// Events emitted by this refresh.
    pub events: Vec<PollEvent>,
}

impl RefreshOutcome {
    pub fn into_dto(self, now: DateTime<Utc>) -> RefreshPollDto {
        RefreshPollDto {
            poll: self.poll.into_dto(now),
            remaining_seconds: self.remaining_seconds,
            overdue: self.overdue,
            events: self
                .events
                .into_iter()
                .map(|event| event.as_str().to_string())
                .collect(),
        }
    }
}

/// What a single countdown cycle did.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Events to announce, paired with the poll they concern.
    pub events: Vec<(Poll, PollEvent)>,
    /// Polls still active after the cycle, soonest first.
    pub active: Vec<Poll>,
    /// Closed polls removed from the registry.
    pub purged: Vec<PollId>,
}

impl CycleReport {
    /// Whether the cycle changed anything that has to be persisted.
    pub fn changed(&self) -> bool {
        !self.events.is_empty() || !self.purged.is_empty()
    }
}

//! State documents, in the current layout and both legacy layouts.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

pub const SERVER_NAME: &str = "Testing Server";

/// Message id of the legacy poll. Encodes a creation time in 2024.
pub const LEGACY_POLL_MESSAGE_ID: u64 = 1_234_567_890_123_456_789;

/// Message displaying the poll of `with_active_poll`.
pub const POLL_MESSAGE_ID: u64 = 555;

/// Channel the legacy poll was posted in.
pub const LEGACY_POLL_CHANNEL_ID: u64 = 900_000_000_000_000_012;

/// Empty state in the current layout.
pub fn idle() -> Value {
    json!({
        "status": { "is_running": false },
        "polls": [],
        "next_poll_id": 1
    })
}

/// Current layout with a running session started by `alice`.
pub fn running() -> Value {
    json!({
        "status": {
            "is_running": true,
            "server_name": SERVER_NAME,
            "host": "john",
            "ping": "@everyone",
            "description": null,
            "started_by": "alice",
            "started_at": "2025-01-01T12:00:00Z"
        },
        "polls": [],
        "next_poll_id": 1
    })
}

/// Current layout holding one active poll closing `minutes` after `now`.
///
/// A negative `minutes` gives a poll that is already overdue. The poll is displayed
/// by message `555` in the SSUP channel.
///
/// # Default Values
/// - id: `1`, next_poll_id: `2`
/// - server_name: `"Testing Server"`
/// - role_target: `"@everyone"`
pub fn with_active_poll(now: DateTime<Utc>, minutes: i64) -> Value {
    let target_time = now + Duration::minutes(minutes);
    let created_at = target_time.min(now) - Duration::minutes(1);

    json!({
        "status": { "is_running": false },
        "polls": [{
            "id": 1,
            "server_name": SERVER_NAME,
            "created_by": "alice",
            "role_target": "@everyone",
            "description": null,
            "created_at": created_at.to_rfc3339(),
            "target_time": target_time.to_rfc3339(),
            "state": "active",
            "closed_at": null,
            "threshold_notified": false,
            "due_notified": false,
            "message": { "channel_id": LEGACY_POLL_CHANNEL_ID, "message_id": POLL_MESSAGE_ID }
        }],
        "next_poll_id": 2
    })
}

/// Nested legacy layout: a running session and one poll keyed by message id.
///
/// Timestamps are naive, as the first release wrote them.
pub fn legacy_nested() -> Value {
    json!({
        "last_ssu_data": {
            "server_name": SERVER_NAME,
            "host": "john",
            "ping": "@everyone",
            "description": "Weekly session",
            "timestamp": "2025-01-01 12:00:00.123456",
            "user": "alice"
        },
        "command_state": {
            "last_command": "SSU",
            "can_use_ssu": false,
            "can_use_ssd": true
        },
        "active_polls": {
            LEGACY_POLL_MESSAGE_ID.to_string(): {
                "server_name": "Poll Server",
                "target_time": "2099-01-01 18:30:00",
                "created_by": "bob",
                "channel_id": LEGACY_POLL_CHANNEL_ID,
                "role_ping": "<@&42>",
                "description": null
            }
        }
    })
}

/// Flat legacy layout holding only the last session fields.
pub fn legacy_flat() -> Value {
    json!({
        "server_name": SERVER_NAME,
        "host": "john",
        "ping": "@here",
        "timestamp": "2025-01-01T12:00:00",
        "user": "alice"
    })
}

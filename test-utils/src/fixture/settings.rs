//! Settings documents.

use serde_json::{json, Value};

/// Guild the configured settings are bound to.
pub const GUILD_ID: u64 = 900_000_000_000_000_001;

pub const SSU_CHANNEL_ID: u64 = 900_000_000_000_000_010;
pub const SSD_CHANNEL_ID: u64 = 900_000_000_000_000_011;
pub const SSUP_CHANNEL_ID: u64 = 900_000_000_000_000_012;

/// Role allowed to run operator commands.
pub const OPERATOR_ROLE: &str = "Host";

/// Discord user listed as an admin user.
pub const ADMIN_USER_ID: u64 = 900_000_000_000_000_100;

/// Token of an API client holding the operator role.
pub const OPERATOR_TOKEN: &str = "operator-token";

/// Token of an API client flagged as admin.
pub const ADMIN_TOKEN: &str = "admin-token";

/// Token of an API client without any role.
pub const GUEST_TOKEN: &str = "guest-token";

/// Settings with every announcement channel, one allowed role and three API clients.
///
/// # Default Values
/// - allowed_roles: `["Host"]`
/// - api_clients: `operator` (role Host), `admin` (admin flag), `guest` (no roles)
/// - poll: defaults (60 s interval, 5 min threshold, auto-cancel, 10 active polls)
pub fn configured() -> Value {
    json!({
        "guild_id": GUILD_ID,
        "ssu_channel_id": SSU_CHANNEL_ID,
        "ssd_channel_id": SSD_CHANNEL_ID,
        "ssup_channel_id": SSUP_CHANNEL_ID,
        "allowed_roles": [OPERATOR_ROLE],
        "admin_users": [ADMIN_USER_ID],
        "auto_update": true,
        "api_clients": [
            { "name": "operator", "token": OPERATOR_TOKEN, "roles": [OPERATOR_ROLE] },
            { "name": "admin", "token": ADMIN_TOKEN, "admin": true },
            { "name": "guest", "token": GUEST_TOKEN }
        ]
    })
}

/// Settings with no announcement channels configured.
pub fn unconfigured() -> Value {
    json!({
        "allowed_roles": [],
        "api_clients": [
            { "name": "admin", "token": ADMIN_TOKEN, "admin": true }
        ]
    })
}

/// Settings document as written by the first release of the bot.
///
/// Unknown keys such as the bot token are ignored on load.
pub fn legacy() -> Value {
    json!({
        "token": "YOUR_BOT_TOKEN_HERE",
        "ssu_channel_id": SSU_CHANNEL_ID,
        "ssd_channel_id": null,
        "ssup_channel_id": SSUP_CHANNEL_ID,
        "guild_id": null,
        "allowed_roles": ["Staff"]
    })
}

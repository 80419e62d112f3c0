//! Persisted bot settings.
//!
//! Settings are loaded from `settings.json` at startup and replaced as a whole when
//! an admin changes them through the `config` command or the REST mirror.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    model::settings::{ApiClientDto, RolesDto, SettingsDto},
    server::model::poll::PollConfig,
};

pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 8080;

/// Announcement channel kinds, one per announced operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementChannel {
    /// Server startup announcements.
    Ssu,
    /// Server shutdown announcements.
    Ssd,
    /// Startup polls.
    Ssup,
}

impl AnnouncementChannel {
    /// Parses the setting name used by the `config` command (`ssu_channel`, ...).
    pub fn from_setting(setting: &str) -> Option<Self> {
        match setting.to_lowercase().as_str() {
            "ssu_channel" | "ssu" => Some(Self::Ssu),
            "ssd_channel" | "ssd" => Some(Self::Ssd),
            "ssup_channel" | "ssup" => Some(Self::Ssup),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ssu => "SSU",
            Self::Ssd => "SSD",
            Self::Ssup => "SSUP",
        }
    }
}

impl fmt::Display for AnnouncementChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Address the REST mirror binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            port: DEFAULT_API_PORT,
        }
    }
}

/// Credential of an external client of the REST mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiClient {
    /// Name recorded as the acting user for operations done through this client.
    pub name: String,
    /// Bearer token presented in the `Authorization` header.
    pub token: String,
    /// Role names granted to the client, checked against the allowed roles.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Whether the client may change settings.
    #[serde(default)]
    pub admin: bool,
}

/// Bot settings persisted in `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Guild the bot answers commands in; any guild when unset.
    pub guild_id: Option<u64>,
    pub ssu_channel_id: Option<u64>,
    pub ssd_channel_id: Option<u64>,
    pub ssup_channel_id: Option<u64>,
    /// Role names allowed to run operator commands. Empty allows everyone.
    pub allowed_roles: Vec<String>,
    /// Discord user ids with admin rights in addition to guild administrators.
    pub admin_users: Vec<u64>,
    pub api: ApiSettings,
    /// Re-render active poll messages on every countdown cycle.
    pub auto_update: bool,
    pub poll: PollConfig,
    pub api_clients: Vec<ApiClient>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            guild_id: None,
            ssu_channel_id: None,
            ssd_channel_id: None,
            ssup_channel_id: None,
            allowed_roles: Vec::new(),
            admin_users: Vec::new(),
            api: ApiSettings::default(),
            auto_update: true,
            poll: PollConfig::default(),
            api_clients: Vec::new(),
        }
    }
}

impl Settings {
    pub fn channel(&self, kind: AnnouncementChannel) -> Option<u64> {
        match kind {
            AnnouncementChannel::Ssu => self.ssu_channel_id,
            AnnouncementChannel::Ssd => self.ssd_channel_id,
            AnnouncementChannel::Ssup => self.ssup_channel_id,
        }
    }

    /// Name of the first field holding a Discord id of 0, if any.
    ///
    /// Discord never assigns 0, so such a value can only come from a hand-edited file.
    pub fn first_zero_id(&self) -> Option<&'static str> {
        [
            ("guild_id", self.guild_id),
            ("ssu_channel_id", self.ssu_channel_id),
            ("ssd_channel_id", self.ssd_channel_id),
            ("ssup_channel_id", self.ssup_channel_id),
        ]
        .into_iter()
        .find(|(_, id)| *id == Some(0))
        .map(|(field, _)| field)
        .or_else(|| self.admin_users.contains(&0).then_some("admin_users"))
    }

    pub fn set_channel(&mut self, kind: AnnouncementChannel, channel_id: u64) {
        let slot = match kind {
            AnnouncementChannel::Ssu => &mut self.ssu_channel_id,
            AnnouncementChannel::Ssd => &mut self.ssd_channel_id,
            AnnouncementChannel::Ssup => &mut self.ssup_channel_id,
        };
        *slot = Some(channel_id);
    }

    /// Whether any of `roles` is in the allowed list, compared case-insensitively.
    ///
    /// An empty allowed list lets everyone through.
    pub fn allows_roles(&self, roles: &[String]) -> bool {
        if self.allowed_roles.is_empty() {
            return true;
        }

        roles.iter().any(|role| {
            self.allowed_roles
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(role))
        })
    }

    /// Adds a role to the allowed list.
    ///
    /// # Returns
    /// - `true` - The role was added
    /// - `false` - The role was already allowed
    pub fn add_role(&mut self, role: &str) -> bool {
        if self
            .allowed_roles
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(role))
        {
            return false;
        }
        self.allowed_roles.push(role.to_string());
        true
    }

    /// Removes a role from the allowed list.
    ///
    /// # Returns
    /// - `true` - The role was removed
    /// - `false` - The role was not in the list
    pub fn remove_role(&mut self, role: &str) -> bool {
        let before = self.allowed_roles.len();
        self.allowed_roles
            .retain(|allowed| !allowed.eq_ignore_ascii_case(role));
        self.allowed_roles.len() != before
    }

    pub fn is_admin_user(&self, user_id: u64) -> bool {
        self.admin_users.contains(&user_id)
    }

    pub fn find_api_client(&self, token: &str) -> Option<&ApiClient> {
        self.api_clients.iter().find(|client| client.token == token)
    }

    /// Converts the settings to their REST representation, dropping client tokens.
    pub fn into_dto(self) -> SettingsDto {
        SettingsDto {
            guild_id: self.guild_id,
            ssu_channel_id: self.ssu_channel_id,
            ssd_channel_id: self.ssd_channel_id,
            ssup_channel_id: self.ssup_channel_id,
            allowed_roles: self.allowed_roles,
            admin_users: self.admin_users,
            api_host: self.api.host,
            api_port: self.api.port,
            auto_update: self.auto_update,
            poll: self.poll.into_dto(),
            api_clients: self
                .api_clients
                .into_iter()
                .map(|client| ApiClientDto {
                    name: client.name,
                    roles: client.roles,
                    admin: client.admin,
                })
                .collect(),
        }
    }

    pub fn into_roles_dto(self) -> RolesDto {
        RolesDto {
            allowed_roles: self.allowed_roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_allowed_roles_allow_everyone() {
        let settings = Settings::default();
        assert!(settings.allows_roles(&[]));
        assert!(settings.allows_roles(&["Anyone".to_string()]));
    }

    #[test]
    fn allowed_roles_compare_case_insensitively() {
        let mut settings = Settings::default();
        assert!(settings.add_role("Host"));
        assert!(!settings.add_role("host"));

        assert!(settings.allows_roles(&["HOST".to_string()]));
        assert!(!settings.allows_roles(&["Player".to_string()]));

        assert!(settings.remove_role("hOsT"));
        assert!(!settings.remove_role("Host"));
        assert!(settings.allowed_roles.is_empty());
    }

    #[test]
    fn settings_dto_omits_tokens() {
        let mut settings = Settings::default();
        settings.api_clients.push(ApiClient {
            name: "ci".to_string(),
            token: "secret-token".to_string(),
            roles: vec!["Host".to_string()],
            admin: false,
        });

        let json = serde_json::to_string(&settings.into_dto()).unwrap();

        assert!(json.contains("\"ci\""));
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn finds_zero_ids() {
        let mut settings = Settings::default();
        assert_eq!(settings.first_zero_id(), None);

        settings.admin_users.push(0);
        assert_eq!(settings.first_zero_id(), Some("admin_users"));

        settings.ssd_channel_id = Some(0);
        assert_eq!(settings.first_zero_id(), Some("ssd_channel_id"));
    }

    #[test]
    fn channels_are_addressed_by_kind() {
        let mut settings = Settings::default();
        settings.set_channel(AnnouncementChannel::Ssup, 42);
        assert_eq!(settings.channel(AnnouncementChannel::Ssup), Some(42));
        assert_eq!(settings.channel(AnnouncementChannel::Ssu), None);
        assert_eq!(
            AnnouncementChannel::from_setting("SSD_CHANNEL"),
            Some(AnnouncementChannel::Ssd)
        );
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Settings as exposed to admins. API client tokens are never included.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct SettingsDto {
    #[serde(with = "crate::model::id::option", default)]
    #[schema(value_type = Option<String>)]
    pub guild_id: Option<u64>,
    #[serde(with = "crate::model::id::option", default)]
    #[schema(value_type = Option<String>)]
    pub ssu_channel_id: Option<u64>,
    #[serde(with = "crate::model::id::option", default)]
    #[schema(value_type = Option<String>)]
    pub ssd_channel_id: Option<u64>,
    #[serde(with = "crate::model::id::option", default)]
    #[schema(value_type = Option<String>)]
    pub ssup_channel_id: Option<u64>,
    pub allowed_roles: Vec<String>,
    #[serde(with = "crate::model::id::list", default)]
    #[schema(value_type = Vec<String>)]
    pub admin_users: Vec<u64>,
    pub api_host: String,
    pub api_port: u16,
    pub auto_update: bool,
    pub poll: PollConfigDto,
    pub api_clients: Vec<ApiClientDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PollConfigDto {
    pub update_interval_seconds: u64,
    pub auto_cancel: bool,
    pub notification_threshold_minutes: u64,
    pub max_active_polls: usize,
}

/// API client without its token.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ApiClientDto {
    pub name: String,
    pub roles: Vec<String>,
    pub admin: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RolesDto {
    pub allowed_roles: Vec<String>,
}

/// Body of `POST /roles/add` and `POST /roles/remove`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct RoleDto {
    pub role: String,
}

/// Body of `POST /config/channels`. Absent channels are left unchanged.
///
/// Each value is a channel id or a `<#id>` mention.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default, PartialEq)]
pub struct UpdateChannelsDto {
    #[serde(default)]
    pub ssu_channel: Option<String>,
    #[serde(default)]
    pub ssd_channel: Option<String>,
    #[serde(default)]
    pub ssup_channel: Option<String>,
}

/// Body of `POST /config/poll`. Absent fields are left unchanged.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default, PartialEq)]
pub struct UpdatePollConfigDto {
    #[serde(default)]
    pub update_interval_seconds: Option<u64>,
    #[serde(default)]
    pub auto_cancel: Option<bool>,
    #[serde(default)]
    pub notification_threshold_minutes: Option<u64>,
    #[serde(default)]
    pub max_active_polls: Option<usize>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AutoUpdateDto {
    pub enabled: bool,
}

/// Body of `POST /config/admins/add` and `POST /config/admins/remove`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AdminUserDto {
    /// Discord user id or `<@id>` mention.
    pub user: String,
}

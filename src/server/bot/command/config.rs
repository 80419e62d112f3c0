//! `config` command: shows the settings or changes one of them. Admin only.

use serenity::all::{CreateEmbed, CreateEmbedFooter};

use crate::server::{
    bot::command::{CommandContext, Reply},
    error::{input::InputError, AppError},
    middleware::auth::authorize,
    model::{
        caller::Capability,
        poll::UpdatePollConfigParams,
        settings::{AnnouncementChannel, Settings},
    },
    service::{
        announcement::builder::{COLOR_POLL, FOOTER},
        poll::PollService,
        settings::SettingsService,
    },
    util::parse::{parse_channel_id, parse_flag, parse_role_name, parse_user_id},
};

/// `config [setting] [value]`
///
/// Without a setting the current settings are shown.
pub async fn run(ctx: &CommandContext<'_>, args: &str) -> Result<Reply, AppError> {
    authorize(ctx.state, &ctx.caller, &[Capability::Admin]).await?;

    let (setting, value) = match args.split_once(char::is_whitespace) {
        Some((setting, value)) => (setting, value.trim()),
        None => (args, ""),
    };

    if setting.is_empty() {
        return show(ctx).await;
    }

    let service = SettingsService::new(ctx.state);
    let setting = setting.to_lowercase();

    if let Some(kind) = AnnouncementChannel::from_setting(&setting) {
        let channel_id = parse_channel_id(require_value(ctx, &setting, value)?)?;
        service.set_channel(kind, channel_id).await?;
        return Ok(Reply::Text(format!(
            "✅ {} channel set to <#{}>",
            kind.label(),
            channel_id
        )));
    }

    let reply = match setting.as_str() {
        "add_role" => {
            let role = parse_role_name(require_value(ctx, &setting, value)?, |id| {
                ctx.roles.name_by_id(id)
            })?;
            match service.add_role(&role).await? {
                (_, true) => format!("✅ Added role `{}` to allowed roles", role),
                (_, false) => format!("❌ Role `{}` is already in allowed roles", role),
            }
        }
        "remove_role" => {
            let role = parse_role_name(require_value(ctx, &setting, value)?, |id| {
                ctx.roles.name_by_id(id)
            })?;
            match service.remove_role(&role).await? {
                (_, true) => format!("✅ Removed role `{}` from allowed roles", role),
                (_, false) => format!("❌ Role `{}` not found in allowed roles", role),
            }
        }
        "clear_roles" => {
            service.clear_roles().await?;
            "✅ Cleared all allowed roles. Everyone can now use commands.".to_string()
        }
        "auto_update" => {
            let enabled = parse_flag(require_value(ctx, &setting, value)?)?;
            service.set_auto_update(enabled).await?;
            format!("✅ Poll auto-update turned {}", on_off(enabled))
        }
        "auto_cancel" => {
            let enabled = parse_flag(require_value(ctx, &setting, value)?)?;
            service
                .update_poll_config(UpdatePollConfigParams {
                    auto_cancel: Some(enabled),
                    ..Default::default()
                })
                .await?;
            format!("✅ Automatic poll closing turned {}", on_off(enabled))
        }
        "poll_interval" => {
            let seconds = parse_number(&setting, require_value(ctx, &setting, value)?)?;
            service
                .update_poll_config(UpdatePollConfigParams {
                    update_interval_seconds: Some(seconds),
                    ..Default::default()
                })
                .await?;
            format!("✅ Polls now update every {} seconds", seconds)
        }
        "poll_threshold" => {
            let minutes = parse_number(&setting, require_value(ctx, &setting, value)?)?;
            service
                .update_poll_config(UpdatePollConfigParams {
                    notification_threshold_minutes: Some(minutes),
                    ..Default::default()
                })
                .await?;
            if minutes == 0 {
                "✅ Poll reminders turned off".to_string()
            } else {
                format!("✅ Polls send a reminder {} minutes before start", minutes)
            }
        }
        "max_polls" => {
            let max = parse_number(&setting, require_value(ctx, &setting, value)?)?;
            let max = usize::try_from(max).map_err(|_| {
                InputError::InvalidArguments(format!("'{}' is too large", value))
            })?;
            service
                .update_poll_config(UpdatePollConfigParams {
                    max_active_polls: Some(max),
                    ..Default::default()
                })
                .await?;
            format!("✅ At most {} polls may be active at once", max)
        }
        "add_admin" => {
            let user_id = parse_user_id(require_value(ctx, &setting, value)?)?;
            service.add_admin(user_id).await?;
            format!("✅ <@{}> is now a bot admin", user_id)
        }
        "remove_admin" => {
            let user_id = parse_user_id(require_value(ctx, &setting, value)?)?;
            service.remove_admin(user_id).await?;
            format!("✅ <@{}> is no longer a bot admin", user_id)
        }
        _ => {
            return Err(InputError::InvalidArguments(format!(
                "Unknown setting `{}`. Use `{}config` to list the settings",
                setting, ctx.prefix
            ))
            .into())
        }
    };

    Ok(Reply::Text(reply))
}

async fn show(ctx: &CommandContext<'_>) -> Result<Reply, AppError> {
    let settings = SettingsService::new(ctx.state).get().await;
    let active_polls = PollService::new(ctx.state).list_active().await.len();

    Ok(Reply::Embed(settings_embed(&settings, active_polls, ctx.prefix)))
}

/// Builds the embed listing the current settings and how to change them.
pub fn settings_embed(settings: &Settings, active_polls: usize, prefix: &str) -> CreateEmbed {
    let channel = |kind: AnnouncementChannel| {
        settings
            .channel(kind)
            .map(|id| format!("<#{}>", id))
            .unwrap_or_else(|| "Not set".to_string())
    };
    let roles = if settings.allowed_roles.is_empty() {
        "Everyone".to_string()
    } else {
        settings.allowed_roles.join(", ")
    };
    let admins = if settings.admin_users.is_empty() {
        "None".to_string()
    } else {
        settings
            .admin_users
            .iter()
            .map(|id| format!("<@{}>", id))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let poll = &settings.poll;

    CreateEmbed::new()
        .title("Bot Configuration")
        .color(COLOR_POLL)
        .field("SSU Channel", channel(AnnouncementChannel::Ssu), false)
        .field("SSD Channel", channel(AnnouncementChannel::Ssd), false)
        .field("SSUP Channel", channel(AnnouncementChannel::Ssup), false)
        .field("Allowed Roles", roles, false)
        .field("Bot Admins", admins, false)
        .field(
            "Polls",
            format!(
                "{} active (max {})\nAuto-update: {} every {}s\nAuto-cancel: {}\nReminder: {}",
                active_polls,
                poll.max_active_polls,
                on_off(settings.auto_update),
                poll.update_interval_seconds,
                on_off(poll.auto_cancel),
                if poll.notification_threshold_minutes == 0 {
                    "off".to_string()
                } else {
                    format!("{} min before start", poll.notification_threshold_minutes)
                }
            ),
            false,
        )
        .field(
            "Usage",
            format!(
                "`{p}config ssu_channel <channel>`\n`{p}config ssd_channel <channel>`\n\
                 `{p}config ssup_channel <channel>`\n`{p}config add_role @RoleName`\n\
                 `{p}config remove_role @RoleName`\n`{p}config clear_roles`\n\
                 `{p}config auto_update <on|off>`\n`{p}config auto_cancel <on|off>`\n\
                 `{p}config poll_interval <seconds>`\n`{p}config poll_threshold <minutes>`\n\
                 `{p}config max_polls <n>`\n`{p}config add_admin @user`\n\
                 `{p}config remove_admin @user`",
                p = prefix
            ),
            false,
        )
        .footer(CreateEmbedFooter::new(FOOTER))
}

fn require_value<'v>(
    ctx: &CommandContext<'_>,
    setting: &str,
    value: &'v str,
) -> Result<&'v str, InputError> {
    if value.is_empty() {
        return Err(InputError::InvalidArguments(format!(
            "Usage: `{}config {} <value>`",
            ctx.prefix, setting
        )));
    }
    Ok(value)
}

fn parse_number(setting: &str, value: &str) -> Result<u64, InputError> {
    value.trim().parse::<u64>().map_err(|_| {
        InputError::InvalidArguments(format!("{} expects a whole number, got '{}'", setting, value))
    })
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

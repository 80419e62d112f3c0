use crate::server::{
    error::{config::ConfigError, AppError},
    model::{
        poll::UpdatePollConfigParams,
        settings::{AnnouncementChannel, Settings},
    },
    state::AppState,
};

/// Shortest accepted countdown interval in seconds.
pub const MIN_UPDATE_INTERVAL_SECONDS: u64 = 10;
/// Longest accepted countdown interval in seconds.
pub const MAX_UPDATE_INTERVAL_SECONDS: u64 = 3_600;
/// Largest accepted notification threshold in minutes (one week).
pub const MAX_NOTIFICATION_THRESHOLD_MINUTES: u64 = 10_080;
/// Largest accepted active poll limit.
pub const MAX_ACTIVE_POLLS_LIMIT: usize = 100;

/// Service for reading and changing the persisted settings.
///
/// Changes are applied to a copy, validated and saved before they replace the live
/// settings. A failed save is logged and the change still takes effect in memory.
pub struct SettingsService<'a> {
    state: &'a AppState,
}

impl<'a> SettingsService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn get(&self) -> Settings {
        self.state.settings.read().await.clone()
    }

    /// Sets the channel an announcement kind is posted to.
    pub async fn set_channel(
        &self,
        kind: AnnouncementChannel,
        channel_id: u64,
    ) -> Result<Settings, AppError> {
        self.set_channels(&[(kind, channel_id)]).await
    }

    /// Sets several announcement channels in one change.
    ///
    /// # Returns
    /// - `Ok(Settings)` - Settings after the change
    /// - `Err(AppError::ConfigErr(InvalidSetting))` - No channel was given
    pub async fn set_channels(
        &self,
        channels: &[(AnnouncementChannel, u64)],
    ) -> Result<Settings, AppError> {
        if channels.is_empty() {
            return Err(invalid("channels", "at least one channel is required".to_string()));
        }

        self.update(|settings| {
            for (kind, channel_id) in channels {
                settings.set_channel(*kind, *channel_id);
            }
            Ok(())
        })
        .await
    }

    /// Adds a role name to the allowed roles.
    ///
    /// # Returns
    /// - `Ok((Settings, true))` - Role added
    /// - `Ok((Settings, false))` - Role was already allowed, nothing changed
    /// - `Err(AppError::ConfigErr(InvalidSetting))` - Empty role name
    pub async fn add_role(&self, role: &str) -> Result<(Settings, bool), AppError> {
        let role = non_empty("add_role", role)?;
        let mut added = false;
        let settings = self
            .update(|settings| {
                added = settings.add_role(&role);
                Ok(())
            })
            .await?;
        Ok((settings, added))
    }

    /// Removes a role name from the allowed roles.
    ///
    /// # Returns
    /// - `Ok((Settings, true))` - Role removed
    /// - `Ok((Settings, false))` - Role was not in the list
    pub async fn remove_role(&self, role: &str) -> Result<(Settings, bool), AppError> {
        let role = non_empty("remove_role", role)?;
        let mut removed = false;
        let settings = self
            .update(|settings| {
                removed = settings.remove_role(&role);
                Ok(())
            })
            .await?;
        Ok((settings, removed))
    }

    /// Clears the allowed roles, letting everyone run operator commands.
    pub async fn clear_roles(&self) -> Result<Settings, AppError> {
        self.update(|settings| {
            settings.allowed_roles.clear();
            Ok(())
        })
        .await
    }

    pub async fn set_auto_update(&self, enabled: bool) -> Result<Settings, AppError> {
        self.update(|settings| {
            settings.auto_update = enabled;
            Ok(())
        })
        .await
    }

    /// Applies a partial poll configuration change.
    ///
    /// A changed update interval is published to the scheduler, which reschedules
    /// the countdown job.
    ///
    /// # Returns
    /// - `Ok(Settings)` - Settings after the change
    /// - `Err(AppError::ConfigErr(InvalidSetting))` - A value is out of range
    pub async fn update_poll_config(
        &self,
        params: UpdatePollConfigParams,
    ) -> Result<Settings, AppError> {
        let settings = self
            .update(|settings| {
                let poll = &mut settings.poll;

                if let Some(interval) = params.update_interval_seconds {
                    if !(MIN_UPDATE_INTERVAL_SECONDS..=MAX_UPDATE_INTERVAL_SECONDS)
                        .contains(&interval)
                    {
                        return Err(invalid(
                            "poll_interval",
                            format!(
                                "must be between {} and {} seconds",
                                MIN_UPDATE_INTERVAL_SECONDS, MAX_UPDATE_INTERVAL_SECONDS
                            ),
                        ));
                    }
                    poll.update_interval_seconds = interval;
                }

                if let Some(threshold) = params.notification_threshold_minutes {
                    if threshold > MAX_NOTIFICATION_THRESHOLD_MINUTES {
                        return Err(invalid(
                            "poll_threshold",
                            format!(
                                "must be at most {} minutes",
                                MAX_NOTIFICATION_THRESHOLD_MINUTES
                            ),
                        ));
                    }
                    poll.notification_threshold_minutes = threshold;
                }

                if let Some(max) = params.max_active_polls {
                    if !(1..=MAX_ACTIVE_POLLS_LIMIT).contains(&max) {
                        return Err(invalid(
                            "max_polls",
                            format!("must be between 1 and {}", MAX_ACTIVE_POLLS_LIMIT),
                        ));
                    }
                    poll.max_active_polls = max;
                }

                if let Some(auto_cancel) = params.auto_cancel {
                    poll.auto_cancel = auto_cancel;
                }

                Ok(())
            })
            .await?;

        self.state
            .poll_interval
            .send_if_modified(|interval| {
                let changed = *interval != settings.poll.update_interval_seconds;
                *interval = settings.poll.update_interval_seconds;
                changed
            });

        Ok(settings)
    }

    /// Adds a Discord user id to the admin users.
    pub async fn add_admin(&self, user_id: u64) -> Result<Settings, AppError> {
        self.update(|settings| {
            if !settings.admin_users.contains(&user_id) {
                settings.admin_users.push(user_id);
            }
            Ok(())
        })
        .await
    }

    /// Removes a Discord user id from the admin users.
    pub async fn remove_admin(&self, user_id: u64) -> Result<Settings, AppError> {
        self.update(|settings| {
            settings.admin_users.retain(|id| *id != user_id);
            Ok(())
        })
        .await
    }

    /// Applies `change` to a copy of the settings, saves it and swaps it in.
    async fn update<F>(&self, change: F) -> Result<Settings, AppError>
    where
        F: FnOnce(&mut Settings) -> Result<(), AppError>,
    {
        let mut current = self.state.settings.write().await;
        let mut updated = current.clone();
        change(&mut updated)?;

        if updated == *current {
            return Ok(updated);
        }

        if let Err(err) = self.state.settings_repo.save(&updated).await {
            tracing::error!("Failed to save settings: {}", err);
        }
        *current = updated.clone();

        tracing::info!("Settings updated");

        Ok(updated)
    }
}

fn non_empty(setting: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid(setting, "must not be empty".to_string()));
    }
    Ok(value.to_string())
}

fn invalid(setting: &str, reason: String) -> AppError {
    ConfigError::InvalidSetting {
        setting: setting.to_string(),
        reason,
    }
    .into()
}

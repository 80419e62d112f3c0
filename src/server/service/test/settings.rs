use super::*;
use crate::server::{
    error::config::ConfigError,
    model::{poll::UpdatePollConfigParams, settings::AnnouncementChannel},
    service::{server_status::ServerStatusService, settings::SettingsService},
};
use test_utils::fixture;

/// Tests adding and removing allowed roles.
///
/// Verifies case-insensitive de-duplication and that each change reaches settings.json.
///
/// Expected: added once, duplicate ignored, removed regardless of case
#[tokio::test]
async fn manages_allowed_roles() -> Result<(), AppError> {
    let (test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;
    let service = SettingsService::new(&state);

    let (settings, added) = service.add_role("Staff").await?;
    assert!(added);
    assert_eq!(settings.allowed_roles, vec!["Host", "Staff"]);

    let (_, added) = service.add_role("staff").await?;
    assert!(!added);

    let stored = test.read_settings().unwrap().unwrap();
    assert_eq!(stored["allowed_roles"], serde_json::json!(["Host", "Staff"]));

    let (settings, removed) = service.remove_role("HOST").await?;
    assert!(removed);
    assert_eq!(settings.allowed_roles, vec!["Staff"]);

    let settings = service.clear_roles().await?;
    assert!(settings.allowed_roles.is_empty());
    assert!(service.get().await.allowed_roles.is_empty());

    Ok(())
}

/// Tests adding a blank role name.
///
/// Expected: Err(InvalidSetting)
#[tokio::test]
async fn rejects_blank_role() -> Result<(), AppError> {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;

    let result = SettingsService::new(&state).add_role("  ").await;

    assert!(matches!(
        result,
        Err(AppError::ConfigErr(ConfigError::InvalidSetting { .. }))
    ));

    Ok(())
}

/// Tests configuring a missing channel.
///
/// Verifies that a startup rejected for lack of a channel succeeds once an admin sets
/// the channel.
///
/// Expected: channel persisted, startup accepted afterwards
#[tokio::test]
async fn setting_channel_enables_startup() -> Result<(), AppError> {
    let (test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::unconfigured())).await?;

    SettingsService::new(&state)
        .set_channel(AnnouncementChannel::Ssu, 42)
        .await?;

    let stored = test.read_settings().unwrap().unwrap();
    assert_eq!(stored["ssu_channel_id"], 42);

    let status = ServerStatusService::new(&state)
        .start(crate::server::model::server_status::StartServerParams {
            server_name: "Downtown".to_string(),
            host: "john".to_string(),
            ping: "@here".to_string(),
            description: None,
            started_by: "alice".to_string(),
        })
        .await?;
    assert!(status.is_running);

    Ok(())
}

/// Tests changing the countdown interval.
///
/// Verifies that the new interval is published to the scheduler, and that setting
/// the same value again publishes nothing.
///
/// Expected: watch channel updated once with 120
#[tokio::test]
async fn publishes_changed_poll_interval() -> Result<(), AppError> {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;
    let service = SettingsService::new(&state);
    let mut interval = state.poll_interval.subscribe();

    let params = UpdatePollConfigParams {
        update_interval_seconds: Some(120),
        ..Default::default()
    };
    let settings = service.update_poll_config(params.clone()).await?;

    assert_eq!(settings.poll.update_interval_seconds, 120);
    assert!(interval.has_changed().unwrap());
    assert_eq!(*interval.borrow_and_update(), 120);

    service.update_poll_config(params).await?;
    assert!(!interval.has_changed().unwrap());

    Ok(())
}

/// Tests out of range poll settings.
///
/// Expected: each rejected with InvalidSetting naming the setting, settings unchanged
#[tokio::test]
async fn rejects_out_of_range_poll_config() -> Result<(), AppError> {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;
    let service = SettingsService::new(&state);
    let before = service.get().await;

    let cases = [
        (
            UpdatePollConfigParams {
                update_interval_seconds: Some(5),
                ..Default::default()
            },
            "poll_interval",
        ),
        (
            UpdatePollConfigParams {
                notification_threshold_minutes: Some(20_000),
                ..Default::default()
            },
            "poll_threshold",
        ),
        (
            UpdatePollConfigParams {
                max_active_polls: Some(0),
                ..Default::default()
            },
            "max_polls",
        ),
    ];

    for (params, expected) in cases {
        match service.update_poll_config(params).await {
            Err(AppError::ConfigErr(ConfigError::InvalidSetting { setting, .. })) => {
                assert_eq!(setting, expected)
            }
            other => panic!("expected InvalidSetting for {expected}, got {other:?}"),
        }
    }

    assert_eq!(service.get().await, before);

    Ok(())
}

/// Tests adding and removing admin users.
///
/// Expected: ids added once and removed
#[tokio::test]
async fn manages_admin_users() -> Result<(), AppError> {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::unconfigured())).await?;
    let service = SettingsService::new(&state);

    service.add_admin(7).await?;
    let settings = service.add_admin(7).await?;
    assert_eq!(settings.admin_users, vec![7]);
    assert!(settings.is_admin_user(7));

    let settings = service.remove_admin(7).await?;
    assert!(settings.admin_users.is_empty());

    Ok(())
}

use chrono::{Duration, Utc};

use super::*;
use crate::server::{
    error::{config::ConfigError, input::InputError, poll::PollError},
    model::{
        poll::{CreatePollParams, PollEvent, PollId, PollState, UpdatePollConfigParams},
        settings::AnnouncementChannel,
    },
    service::{poll::PollService, settings::SettingsService},
};
use test_utils::fixture;

fn poll_params(duration_expr: &str) -> CreatePollParams {
    CreatePollParams {
        server_name: "Downtown".to_string(),
        duration_expr: duration_expr.to_string(),
        role_target: Some("@here".to_string()),
        description: None,
        created_by: "alice".to_string(),
    }
}

/// Tests creating a poll with a valid duration.
///
/// Verifies the target time, the persisted record and the queued notification.
///
/// Expected: Ok with an active poll closing 30 minutes from now, PollCreated queued
#[tokio::test]
async fn creates_poll_and_queues_message() -> Result<(), AppError> {
    let (test, state, mut rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;
    let before = Utc::now();

    let poll = PollService::new(&state).create(poll_params("30min")).await?;

    assert_eq!(poll.id, PollId(1));
    assert_eq!(poll.state, PollState::Active);
    let expected = before + Duration::seconds(1800);
    assert!((poll.target_time - expected).num_seconds().abs() <= 1);

    assert_eq!(drain(&mut rx), vec![Notification::PollCreated(poll)]);

    let stored = test.read_state().unwrap().unwrap();
    assert_eq!(stored["polls"][0]["id"], 1);
    assert_eq!(stored["polls"][0]["state"], "active");
    assert_eq!(stored["next_poll_id"], 2);

    Ok(())
}

/// Tests creating a poll without an SSUP channel.
///
/// Expected: Err(ChannelNotConfigured(Ssup)), no poll created
#[tokio::test]
async fn create_requires_ssup_channel() -> Result<(), AppError> {
    let (_test, state, mut rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::unconfigured())).await?;
    let service = PollService::new(&state);

    let result = service.create(poll_params("30min")).await;

    assert!(matches!(
        result,
        Err(AppError::ConfigErr(ConfigError::ChannelNotConfigured(
            AnnouncementChannel::Ssup
        )))
    ));
    assert!(service.list_active().await.is_empty());
    assert!(drain(&mut rx).is_empty());

    Ok(())
}

/// Tests creating a poll with an unknown duration unit.
///
/// Expected: Err(InvalidDuration) quoting the input
#[tokio::test]
async fn create_rejects_invalid_duration() -> Result<(), AppError> {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;

    let result = PollService::new(&state).create(poll_params("45xyz")).await;

    assert!(matches!(
        result,
        Err(AppError::InputErr(InputError::InvalidDuration { ref input, .. })) if input == "45xyz"
    ));

    Ok(())
}

/// Tests cancelling the same poll twice.
///
/// Expected: first Ok with PollCancelled queued, second Err(AlreadyTerminal)
#[tokio::test]
async fn cancel_twice_reports_already_terminal() -> Result<(), AppError> {
    let (_test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(Utc::now(), 30)),
    )
    .await?;
    let service = PollService::new(&state);

    let cancelled = service.cancel(PollId(1), "bob").await?;
    assert_eq!(cancelled.state, PollState::Cancelled);
    assert_eq!(
        drain(&mut rx),
        vec![Notification::PollCancelled {
            poll: cancelled,
            cancelled_by: "bob".to_string(),
        }]
    );

    let second = service.cancel(PollId(1), "bob").await;
    assert!(matches!(
        second,
        Err(AppError::PollErr(PollError::AlreadyTerminal {
            state: PollState::Cancelled,
            ..
        }))
    ));
    assert!(drain(&mut rx).is_empty());

    Ok(())
}

/// Tests cancelling a poll that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn cancel_unknown_poll() -> Result<(), AppError> {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;

    let result = PollService::new(&state).cancel(PollId(42), "bob").await;

    assert!(matches!(
        result,
        Err(AppError::PollErr(PollError::NotFound(_)))
    ));

    Ok(())
}

/// Tests refreshing an overdue poll with auto-cancel enabled.
///
/// Expected: poll expired, overdue flag set, PollExpired queued without a re-render
#[tokio::test]
async fn refresh_expires_overdue_poll() -> Result<(), AppError> {
    let (test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(Utc::now(), -1)),
    )
    .await?;

    let outcome = PollService::new(&state).refresh(PollId(1)).await?;

    assert_eq!(outcome.poll.state, PollState::Expired);
    assert!(outcome.overdue);
    assert!(outcome.remaining_seconds <= 0);
    assert_eq!(outcome.events, vec![PollEvent::Expired]);
    assert_eq!(drain(&mut rx), vec![Notification::PollExpired(outcome.poll)]);

    let stored = test.read_state().unwrap().unwrap();
    assert_eq!(stored["polls"][0]["state"], "expired");

    Ok(())
}

/// Tests refreshing a poll far from its target time.
///
/// Expected: poll still active, no events, one PollRender queued
#[tokio::test]
async fn refresh_renders_active_poll() -> Result<(), AppError> {
    let (_test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(Utc::now(), 30)),
    )
    .await?;

    let outcome = PollService::new(&state).refresh(PollId(1)).await?;

    assert_eq!(outcome.poll.state, PollState::Active);
    assert!(!outcome.overdue);
    assert!(outcome.remaining_seconds > 29 * 60);
    assert!(outcome.events.is_empty());
    assert_eq!(drain(&mut rx), vec![Notification::PollRender(outcome.poll)]);

    Ok(())
}

/// Tests two consecutive cycles for a poll inside the notification threshold.
///
/// Verifies that the nearing-expiry notice is queued once and persisted, while the
/// message is re-rendered on every cycle.
///
/// Expected: first cycle NearingExpiry + render, second cycle render only
#[tokio::test]
async fn cycle_notifies_nearing_expiry_once() -> Result<(), AppError> {
    let now = Utc::now();
    let (test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(now, 3)),
    )
    .await?;
    let service = PollService::new(&state);

    let first = service.run_cycle(now).await;
    assert_eq!(first.events.len(), 1);
    assert_eq!(first.events[0].1, PollEvent::NearingExpiry);
    let kinds: Vec<_> = drain(&mut rx).iter().map(Notification::kind).collect();
    assert_eq!(kinds, vec!["poll_nearing_expiry", "poll_render"]);

    let stored = test.read_state().unwrap().unwrap();
    assert_eq!(stored["polls"][0]["threshold_notified"], true);

    let second = service.run_cycle(now + Duration::seconds(60)).await;
    assert!(second.events.is_empty());
    let kinds: Vec<_> = drain(&mut rx).iter().map(Notification::kind).collect();
    assert_eq!(kinds, vec!["poll_render"]);

    Ok(())
}

/// Tests a cycle with auto-update disabled.
///
/// Expected: no re-render queued for the active poll
#[tokio::test]
async fn cycle_skips_render_without_auto_update() -> Result<(), AppError> {
    let now = Utc::now();
    let (_test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(now, 30)),
    )
    .await?;
    SettingsService::new(&state).set_auto_update(false).await?;

    let report = PollService::new(&state).run_cycle(now).await;

    assert_eq!(report.active.len(), 1);
    assert!(drain(&mut rx).is_empty());

    Ok(())
}

/// Tests a cycle with no polls at all.
///
/// Expected: empty report, nothing queued, no state file written
#[tokio::test]
async fn cycle_tolerates_empty_registry() -> Result<(), AppError> {
    let (test, state, mut rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await?;

    let report = PollService::new(&state).run_cycle(Utc::now()).await;

    assert!(report.events.is_empty());
    assert!(report.active.is_empty());
    assert!(drain(&mut rx).is_empty());
    assert!(!test.state_path().exists());

    Ok(())
}

/// Tests an overdue poll with auto-cancel disabled.
///
/// Verifies that the poll stays active, the due notice is queued once and an operator
/// can then complete it.
///
/// Expected: PollDue once, then Ok(Completed) with PollCompleted queued
#[tokio::test]
async fn due_poll_stays_active_until_completed() -> Result<(), AppError> {
    let now = Utc::now();
    let (_test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(now, -1)),
    )
    .await?;
    SettingsService::new(&state)
        .update_poll_config(UpdatePollConfigParams {
            auto_cancel: Some(false),
            ..Default::default()
        })
        .await?;
    let service = PollService::new(&state);

    let first = service.run_cycle(now).await;
    let second = service.run_cycle(now).await;

    assert_eq!(first.events.len(), 1);
    assert_eq!(first.events[0].1, PollEvent::Due);
    assert!(second.events.is_empty());
    assert_eq!(second.active.len(), 1);

    let kinds: Vec<_> = drain(&mut rx)
        .iter()
        .map(Notification::kind)
        .filter(|kind| *kind != "poll_render")
        .collect();
    assert_eq!(kinds, vec!["poll_due"]);

    let completed = service.complete(PollId(1), "bob").await?;
    assert_eq!(completed.state, PollState::Completed);
    assert_eq!(
        drain(&mut rx),
        vec![Notification::PollCompleted {
            poll: completed,
            completed_by: "bob".to_string(),
        }]
    );

    Ok(())
}

/// Tests completing a poll before its target time.
///
/// Expected: Err(NotDue), poll still active
#[tokio::test]
async fn complete_rejects_poll_not_due() -> Result<(), AppError> {
    let (_test, state, _rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(Utc::now(), 30)),
    )
    .await?;
    let service = PollService::new(&state);

    let result = service.complete(PollId(1), "bob").await;

    assert!(matches!(
        result,
        Err(AppError::PollErr(PollError::NotDue(PollId(1))))
    ));
    assert!(service.get(PollId(1)).await?.is_active());

    Ok(())
}

/// Tests resolving a poll by its id and by the id of its message.
///
/// Expected: both references resolve to poll 1, an unknown reference is NotFound
#[tokio::test]
async fn finds_poll_by_id_or_message() -> Result<(), AppError> {
    let (_test, state, _rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(Utc::now(), 30)),
    )
    .await?;
    let service = PollService::new(&state);

    assert_eq!(service.find_by_reference(1).await?.id, PollId(1));
    assert_eq!(
        service
            .find_by_reference(fixture::state::POLL_MESSAGE_ID)
            .await?
            .id,
        PollId(1)
    );
    assert!(matches!(
        service.find_by_reference(999).await,
        Err(AppError::PollErr(PollError::NotFound(_)))
    ));

    Ok(())
}

/// Tests the deletion of a poll's message.
///
/// Expected: the poll is cancelled silently; an unrelated message changes nothing
#[tokio::test]
async fn deleted_message_cancels_poll() -> Result<(), AppError> {
    let (_test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(Utc::now(), 30)),
    )
    .await?;
    let service = PollService::new(&state);

    assert!(service.message_deleted(999).await?.is_none());

    let cancelled = service
        .message_deleted(fixture::state::POLL_MESSAGE_ID)
        .await?
        .unwrap();
    assert_eq!(cancelled.state, PollState::Cancelled);
    assert!(drain(&mut rx).is_empty());

    assert!(service
        .message_deleted(fixture::state::POLL_MESSAGE_ID)
        .await?
        .is_none());

    Ok(())
}

/// Tests a cancel racing a countdown cycle on an overdue poll.
///
/// Both operations take the registry lock, so exactly one of them closes the poll:
/// either the cancel wins and the cycle emits nothing, or the cycle expires the poll
/// and the cancel observes the terminal state.
///
/// Expected: exactly one terminal transition
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancel_racing_cycle_closes_poll_once() -> Result<(), AppError> {
    let now = Utc::now();
    let (_test, state, mut rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(now, -1)),
    )
    .await?;

    let cancel_state = state.clone();
    let cancel = tokio::spawn(async move {
        PollService::new(&cancel_state)
            .cancel(PollId(1), "bob")
            .await
    });
    let cycle_state = state.clone();
    let cycle =
        tokio::spawn(async move { PollService::new(&cycle_state).run_cycle(Utc::now()).await });

    let cancel = cancel.await.unwrap();
    let report = cycle.await.unwrap();

    let final_state = PollService::new(&state).get(PollId(1)).await?.state;
    match cancel {
        Ok(poll) => {
            assert_eq!(poll.state, PollState::Cancelled);
            assert!(report.events.is_empty());
            assert_eq!(final_state, PollState::Cancelled);
        }
        Err(AppError::PollErr(PollError::AlreadyTerminal {
            state: PollState::Expired,
            ..
        })) => {
            assert_eq!(report.events.len(), 1);
            assert_eq!(report.events[0].1, PollEvent::Expired);
            assert_eq!(final_state, PollState::Expired);
        }
        Err(other) => panic!("unexpected cancel result: {other}"),
    }

    let terminal = drain(&mut rx)
        .iter()
        .filter(|n| matches!(n, Notification::PollCancelled { .. } | Notification::PollExpired(_)))
        .count();
    assert_eq!(terminal, 1);

    Ok(())
}

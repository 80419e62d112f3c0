use serenity::http::Http;
use std::sync::Arc;

use super::*;
use crate::server::{
    error::internal::InternalError,
    model::poll::{PollId, PollMessage},
    service::{announcement::AnnouncementService, poll::PollService},
};
use test_utils::fixture;

fn offline_service(state: &AppState) -> AnnouncementService {
    AnnouncementService::new(Arc::new(Http::new("")), state.clone(), "!".to_string())
}

fn is_zero_id(result: &Result<(), AppError>, expected: &str) -> bool {
    matches!(
        result,
        Err(AppError::InternalErr(InternalError::ZeroDiscordId { kind })) if *kind == expected
    )
}

/// Tests announcing a startup into a channel with id 0.
///
/// Verifies that the id is refused with an error before any Discord request is made.
///
/// Expected: Err(InternalError::ZeroDiscordId) for the channel
#[tokio::test]
async fn startup_into_zero_channel_fails() -> Result<(), AppError> {
    let (_test, state, _rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::running()),
    )
    .await?;
    state.settings.write().await.ssu_channel_id = Some(0);
    let status = state.registry.lock().await.status.status().clone();

    let result = offline_service(&state)
        .handle(Notification::ServerStarted(status))
        .await;

    assert!(is_zero_id(&result, "channel"), "{result:?}");

    Ok(())
}

/// Tests rendering a poll whose stored message id is 0.
///
/// Expected: Err(InternalError::ZeroDiscordId) for the message
#[tokio::test]
async fn render_with_zero_message_id_fails() -> Result<(), AppError> {
    let (_test, state, _rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(chrono::Utc::now(), 30)),
    )
    .await?;
    let mut poll = PollService::new(&state).get(PollId(1)).await?;
    poll.message = Some(PollMessage {
        channel_id: fixture::settings::SSUP_CHANNEL_ID,
        message_id: 0,
    });

    let result = offline_service(&state)
        .handle(Notification::PollRender(poll))
        .await;

    assert!(is_zero_id(&result, "message"), "{result:?}");

    Ok(())
}

/// Tests that the dispatcher outlives notifications it cannot deliver.
///
/// Queues two startups into a channel with id 0 and closes the queue; the task must
/// log both failures and end normally.
///
/// Expected: dispatcher task finishes without panicking
#[tokio::test]
async fn dispatcher_survives_undeliverable_notifications() -> Result<(), AppError> {
    let (_test, state, _rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::running()),
    )
    .await?;
    state.settings.write().await.ssu_channel_id = Some(0);
    let status = state.registry.lock().await.status.status().clone();

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tx.send(Notification::ServerStarted(status.clone())).unwrap();
    tx.send(Notification::ServerStarted(status)).unwrap();
    drop(tx);

    let dispatcher = offline_service(&state).spawn_dispatcher(rx);

    assert!(dispatcher.await.is_ok());

    Ok(())
}

use chrono::Utc;

use super::*;
use crate::server::{
    bot::command::ussup::{parse_args, PollAction},
    error::input::InputError,
    model::poll::{PollId, PollState},
    service::poll::PollService,
};
use test_utils::fixture::{self, state::POLL_MESSAGE_ID};

/// Tests the accepted USSUP argument forms.
///
/// Expected: bare and bracketed references, with and without an action
#[test]
fn parses_poll_reference_and_action() {
    assert_eq!(parse_args("12"), Ok((12, PollAction::Refresh)));
    assert_eq!(parse_args("[12] [complete]"), Ok((12, PollAction::Complete)));
    assert_eq!(parse_args("555 Cancel"), Ok((555, PollAction::Cancel)));
}

/// Tests malformed USSUP arguments.
///
/// Expected: missing reference, non-numeric reference and unknown action rejected
#[test]
fn rejects_malformed_arguments() {
    assert!(matches!(parse_args(""), Err(InputError::InvalidArguments(_))));
    assert_eq!(
        parse_args("abc"),
        Err(InputError::InvalidPollReference("abc".to_string()))
    );
    assert!(matches!(
        parse_args("12 delete"),
        Err(InputError::InvalidArguments(_))
    ));
}

/// Tests completing an overdue poll addressed by its message id.
///
/// Expected: confirmation reply and the poll completed
#[tokio::test]
async fn completes_overdue_poll_by_message_id() {
    let mut settings = fixture::settings::configured();
    settings["poll"] = serde_json::json!({ "auto_cancel": false });
    let (_test, state, _rx) = setup(
        TestBuilder::new()
            .with_settings(settings)
            .with_state(fixture::state::with_active_poll(Utc::now(), -5)),
    )
    .await;
    let ctx = command_context(&state, operator());

    let reply = run_text(&ctx, &format!("!USSUP [{}] [complete]", POLL_MESSAGE_ID))
        .await
        .unwrap();

    assert_eq!(reply, "✅ Poll #1 completed");
    let poll = PollService::new(&state).get(PollId(1)).await.unwrap();
    assert_eq!(poll.state, PollState::Completed);
}

/// Tests refreshing an active poll.
///
/// Expected: reply showing the remaining time, poll still active
#[tokio::test]
async fn refreshes_active_poll() {
    let (_test, state, _rx) = setup(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::with_active_poll(Utc::now(), 90)),
    )
    .await;
    let ctx = command_context(&state, operator());

    let reply = run_text(&ctx, "!USSUP 1").await.unwrap();

    assert!(reply.starts_with("✅ Poll #1 updated!"), "{reply}");
    assert!(reply.contains("1h"), "{reply}");
}

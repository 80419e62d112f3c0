use tokio::sync::mpsc::UnboundedReceiver;

use crate::server::{
    error::AppError, model::notification::Notification, startup::load_app_state,
    state::AppState,
};
use test_utils::{builder::TestBuilder, context::TestContext};

mod announcement;
mod poll;
mod settings;

/// Builds the test data directory and loads the application state from it.
///
/// The returned context owns the directory and must be kept alive for the duration of
/// the test.
async fn setup(
    builder: TestBuilder,
) -> Result<(TestContext, AppState, UnboundedReceiver<Notification>), AppError> {
    let test = builder.build().await.unwrap();
    let (state, rx) = load_app_state(test.data_dir()).await?;
    Ok((test, state, rx))
}

/// Drains every notification queued so far.
fn drain(rx: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut notifications = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        notifications.push(notification);
    }
    notifications
}

use std::path::Path;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

use crate::server::{
    data::{settings::SettingsRepository, state::StateRepository},
    error::{data::DataError, AppError},
    model::notification::Notification,
    registry::Registry,
    service::notifier::NotificationSink,
    state::AppState,
};

/// Installs the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` and defaults to `info`. Must run before any
/// other startup step so their logs are not lost.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads settings and state from the data directory and builds the application state.
///
/// Creates the data directory and a default `settings.json` on first start. A legacy
/// `state.json` is migrated to the current layout as part of loading. Any failure here
/// is fatal: the bot must not accept commands on top of state it could not read.
///
/// # Arguments
/// - `data_dir` - Directory holding `settings.json` and `state.json`
///
/// # Returns
/// - `Ok((AppState, UnboundedReceiver<Notification>))` - State ready for use, plus the
///   receiving end of the notification queue for the dispatcher
/// - `Err(AppError::DataErr)` - A data file could not be read, parsed or created
pub async fn load_app_state(
    data_dir: &Path,
) -> Result<(AppState, UnboundedReceiver<Notification>), AppError> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|source| DataError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

    let settings_repo = SettingsRepository::new(data_dir);
    let settings = settings_repo.load_or_create().await?;

    let state_repo = StateRepository::new(data_dir);
    let snapshot = state_repo.load().await?;

    let registry = Registry::from_snapshot(snapshot);

    tracing::info!(
        "Loaded state from {}: server running: {}, {} active polls",
        data_dir.display(),
        registry.status.status().is_running,
        registry.polls.active_count()
    );

    let (notifier, rx) = NotificationSink::channel();

    Ok((
        AppState::new(registry, settings, settings_repo, state_repo, notifier),
        rx,
    ))
}

/// Writes the registry one last time before the process exits.
pub async fn save_final_state(state: &AppState) {
    let registry = state.registry.lock().await;

    match state.state_repo.save(&registry.snapshot()).await {
        Ok(()) => tracing::info!("Saved state to {}", state.state_repo.path().display()),
        Err(e) => tracing::error!("Failed to save state on shutdown: {}", e),
    }
}

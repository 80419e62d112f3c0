//! Application state shared across all request handlers, chat commands and jobs.
//!
//! This module defines the `AppState` struct which holds the live registry, the
//! settings and the handles needed to persist and announce changes. The state is
//! initialized once during startup and then cloned into the router, the bot handler
//! and the scheduler.

use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};

use crate::server::{
    data::{settings::SettingsRepository, state::StateRepository},
    model::settings::Settings,
    registry::Registry,
    service::notifier::NotificationSink,
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the registry and settings are behind `Arc`, the
/// repositories only hold file paths and the sink wraps a channel sender.
#[derive(Clone)]
pub struct AppState {
    /// Server status and polls.
    ///
    /// A single lock serialises every mutation, whether it comes from a chat
    /// command, a REST call or the countdown cycle. It is held while the new
    /// snapshot is written so the file never runs behind the memory.
    pub registry: Arc<Mutex<Registry>>,

    /// Settings as last loaded or changed by an admin.
    pub settings: Arc<RwLock<Settings>>,

    pub settings_repo: SettingsRepository,

    pub state_repo: StateRepository,

    /// Queue towards the announcement dispatcher.
    pub notifier: NotificationSink,

    /// Publishes the countdown interval so the scheduler can reschedule itself.
    pub poll_interval: Arc<watch::Sender<u64>>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `registry` - Registry restored from the state file
    /// - `settings` - Settings loaded from the settings file
    /// - `settings_repo` - Repository for `settings.json`
    /// - `state_repo` - Repository for `state.json`
    /// - `notifier` - Sink feeding the announcement dispatcher
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        registry: Registry,
        settings: Settings,
        settings_repo: SettingsRepository,
        state_repo: StateRepository,
        notifier: NotificationSink,
    ) -> Self {
        let (poll_interval, _) = watch::channel(settings.poll.update_interval_seconds);

        Self {
            registry: Arc::new(Mutex::new(registry)),
            settings: Arc::new(RwLock::new(settings)),
            settings_repo,
            state_repo,
            notifier,
            poll_interval: Arc::new(poll_interval),
        }
    }
}

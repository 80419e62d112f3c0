use chrono::{DateTime, Utc};

use crate::server::{
    error::{poll::PollError, AppError},
    model::{
        notification::Notification,
        poll::{CreatePollParams, CycleReport, Poll, PollEvent, PollId, PollMessage, RefreshOutcome},
        settings::AnnouncementChannel,
    },
    service::{persist_state, require_channel},
    state::AppState,
};

/// Service orchestrating startup polls.
///
/// Every mutation follows the same sequence under the registry lock: mutate the
/// registry, persist the snapshot, queue the notifications. The countdown cycle uses
/// the same lock, so a cancel racing a cycle sees exactly one terminal transition.
pub struct PollService<'a> {
    state: &'a AppState,
}

impl<'a> PollService<'a> {
    /// Creates a new PollService instance.
    ///
    /// # Arguments
    /// - `state` - Shared application state
    ///
    /// # Returns
    /// - `PollService` - New service instance
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Creates a poll and queues the message that displays it.
    ///
    /// # Arguments
    /// - `params` - Server name, duration expression, ping target, description, creator
    ///
    /// # Returns
    /// - `Ok(Poll)` - The created poll
    /// - `Err(AppError::ConfigErr(ChannelNotConfigured))` - No SSUP channel set
    /// - `Err(AppError::InputErr)` - Empty server name or invalid duration
    /// - `Err(AppError::PollErr(TooManyActivePolls))` - Active poll limit reached
    pub async fn create(&self, params: CreatePollParams) -> Result<Poll, AppError> {
        require_channel(self.state, AnnouncementChannel::Ssup).await?;
        let config = self.state.settings.read().await.poll.clone();

        let mut registry = self.state.registry.lock().await;
        let poll = registry.polls.create(params, &config, Utc::now())?;
        persist_state(self.state, &registry).await;
        self.state
            .notifier
            .notify(Notification::PollCreated(poll.clone()));
        drop(registry);

        tracing::info!(
            "Poll {} for {} created by {}, closing at {}",
            poll.id,
            poll.server_name,
            poll.created_by,
            poll.target_time
        );

        Ok(poll)
    }

    /// Gets a poll by id.
    pub async fn get(&self, id: PollId) -> Result<Poll, AppError> {
        let registry = self.state.registry.lock().await;
        Ok(registry.polls.get(id)?.clone())
    }

    /// Resolves a poll id or the id of its message.
    pub async fn find_by_reference(&self, reference: u64) -> Result<Poll, AppError> {
        let registry = self.state.registry.lock().await;
        Ok(registry.polls.find_by_reference(reference)?.clone())
    }

    /// Active polls, soonest first.
    pub async fn list_active(&self) -> Vec<Poll> {
        self.state.registry.lock().await.polls.list_active()
    }

    /// Cancels an active poll.
    ///
    /// # Arguments
    /// - `id` - Poll to cancel
    /// - `cancelled_by` - Display name of the acting user
    ///
    /// # Returns
    /// - `Ok(Poll)` - The cancelled poll
    /// - `Err(AppError::PollErr(NotFound | AlreadyTerminal))` - Unknown or closed poll
    pub async fn cancel(&self, id: PollId, cancelled_by: &str) -> Result<Poll, AppError> {
        let mut registry = self.state.registry.lock().await;
        let poll = registry.polls.cancel(id, Utc::now())?;
        persist_state(self.state, &registry).await;
        self.state.notifier.notify(Notification::PollCancelled {
            poll: poll.clone(),
            cancelled_by: cancelled_by.to_string(),
        });
        drop(registry);

        tracing::info!("Poll {} cancelled by {}", poll.id, cancelled_by);

        Ok(poll)
    }

    /// Closes an overdue poll that was kept active because auto-cancel is off.
    ///
    /// # Returns
    /// - `Ok(Poll)` - The completed poll
    /// - `Err(AppError::PollErr(NotDue))` - The target time has not been reached
    /// - `Err(AppError::PollErr(NotFound | AlreadyTerminal))` - Unknown or closed poll
    pub async fn complete(&self, id: PollId, completed_by: &str) -> Result<Poll, AppError> {
        let mut registry = self.state.registry.lock().await;
        let poll = registry.polls.complete(id, Utc::now())?;
        persist_state(self.state, &registry).await;
        self.state.notifier.notify(Notification::PollCompleted {
            poll: poll.clone(),
            completed_by: completed_by.to_string(),
        });
        drop(registry);

        tracing::info!("Poll {} completed by {}", poll.id, completed_by);

        Ok(poll)
    }

    /// Recomputes one poll immediately and re-renders its message.
    ///
    /// # Returns
    /// - `Ok(RefreshOutcome)` - Remaining time, overdue flag and emitted events
    /// - `Err(AppError::PollErr(NotFound | AlreadyTerminal))` - Unknown or closed poll
    pub async fn refresh(&self, id: PollId) -> Result<RefreshOutcome, AppError> {
        let config = self.state.settings.read().await.poll.clone();

        let mut registry = self.state.registry.lock().await;
        let outcome = registry.polls.refresh(id, &config, Utc::now())?;
        if !outcome.events.is_empty() {
            persist_state(self.state, &registry).await;
        }
        for event in &outcome.events {
            self.notify_event(&outcome.poll, *event);
        }
        if outcome.poll.is_active() {
            self.state
                .notifier
                .notify(Notification::PollRender(outcome.poll.clone()));
        }
        drop(registry);

        tracing::debug!(
            "Poll {} refreshed, {}s remaining",
            id,
            outcome.remaining_seconds
        );

        Ok(outcome)
    }

    /// Records the message that displays a poll.
    pub async fn attach_message(&self, id: PollId, message: PollMessage) -> Result<Poll, AppError> {
        let mut registry = self.state.registry.lock().await;
        let poll = registry.polls.attach_message(id, message)?;
        persist_state(self.state, &registry).await;
        Ok(poll)
    }

    /// Cancels the active poll displayed by a message that no longer exists.
    ///
    /// # Returns
    /// - `Ok(Some(Poll))` - A poll was displayed by the message and is now cancelled
    /// - `Ok(None)` - No active poll uses the message
    pub async fn message_deleted(&self, message_id: u64) -> Result<Option<Poll>, AppError> {
        let mut registry = self.state.registry.lock().await;
        let Some(id) = registry
            .polls
            .find_by_message(message_id)
            .filter(|poll| poll.is_active())
            .map(|poll| poll.id)
        else {
            return Ok(None);
        };

        let poll = match registry.polls.cancel(id, Utc::now()) {
            Ok(poll) => poll,
            Err(PollError::AlreadyTerminal { .. }) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        persist_state(self.state, &registry).await;
        drop(registry);

        tracing::info!(
            "Poll {} cancelled because its message {} was deleted",
            poll.id,
            message_id
        );

        Ok(Some(poll))
    }

    /// Runs one countdown cycle at `now`.
    ///
    /// Persists the registry when the cycle changed anything, queues the countdown
    /// events and, with auto-update on, a re-render of every active poll.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> CycleReport {
        let (config, auto_update) = {
            let settings = self.state.settings.read().await;
            (settings.poll.clone(), settings.auto_update)
        };

        let mut registry = self.state.registry.lock().await;
        let report = registry.polls.run_cycle(&config, now);
        if report.changed() {
            persist_state(self.state, &registry).await;
        }
        self.announce_cycle(&report, auto_update);
        drop(registry);

        tracing::debug!(
            "Countdown cycle: {} active, {} events, {} purged",
            report.active.len(),
            report.events.len(),
            report.purged.len()
        );

        report
    }

    fn announce_cycle(&self, report: &CycleReport, auto_update: bool) {
        for (poll, event) in &report.events {
            self.notify_event(poll, *event);
        }

        if auto_update {
            for poll in report.active.iter().filter(|poll| poll.message.is_some()) {
                self.state
                    .notifier
                    .notify(Notification::PollRender(poll.clone()));
            }
        }
    }

    fn notify_event(&self, poll: &Poll, event: PollEvent) {
        let notification = match event {
            PollEvent::NearingExpiry => Notification::PollNearingExpiry(poll.clone()),
            PollEvent::Due => Notification::PollDue(poll.clone()),
            PollEvent::Expired => Notification::PollExpired(poll.clone()),
        };
        self.state.notifier.notify(notification);
    }
}

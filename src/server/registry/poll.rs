//! Registry of SSUP polls keyed by `PollId`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::server::{
    error::{input::InputError, internal::InternalError, poll::PollError, AppError},
    model::poll::{
        CreatePollParams, CycleReport, Poll, PollConfig, PollId, PollMessage, PollState,
        RefreshOutcome,
    },
    registry::countdown,
    util::duration::parse_duration,
};

/// Owns every poll, active or recently closed.
///
/// Ids are allocated from a monotonic counter that survives restarts through the
/// state file, so an id is never handed out twice even after the poll is purged.
#[derive(Debug, Clone, PartialEq)]
pub struct PollRegistry {
    polls: BTreeMap<PollId, Poll>,
    next_id: u64,
}

impl Default for PollRegistry {
    fn default() -> Self {
        Self {
            polls: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl PollRegistry {
    /// Rebuilds a registry from persisted polls.
    ///
    /// The counter is raised above the highest loaded id when the stored counter is
    /// stale, so loaded and new ids never collide.
    pub fn from_parts(polls: Vec<Poll>, next_id: u64) -> Self {
        let highest = polls.iter().map(|poll| poll.id.0).max().unwrap_or(0);
        Self {
            next_id: next_id.max(highest.saturating_add(1)).max(1),
            polls: polls.into_iter().map(|poll| (poll.id, poll)).collect(),
        }
    }

    pub fn polls(&self) -> impl Iterator<Item = &Poll> {
        self.polls.values()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn active_count(&self) -> usize {
        self.polls.values().filter(|poll| poll.is_active()).count()
    }

    /// Creates a new active poll closing `duration_expr` from `now`.
    ///
    /// # Arguments
    /// - `params` - Poll details including the duration expression
    /// - `config` - Countdown configuration providing the active poll limit
    /// - `now` - Creation time
    ///
    /// # Returns
    /// - `Ok(Poll)` - The created poll
    /// - `Err(AppError::InputErr)` - Empty server name or an invalid or zero duration
    /// - `Err(AppError::PollErr(TooManyActivePolls))` - Active poll limit reached
    /// - `Err(AppError::InternalErr(PollIdsExhausted))` - The id counter is at its end
    pub fn create(
        &mut self,
        params: CreatePollParams,
        config: &PollConfig,
        now: DateTime<Utc>,
    ) -> Result<Poll, AppError> {
        let server_name = params.server_name.trim();
        if server_name.is_empty() {
            return Err(
                InputError::InvalidArguments("server name must not be empty".to_string()).into(),
            );
        }

        let duration = parse_duration(&params.duration_expr)?;
        if duration <= chrono::Duration::zero() {
            return Err(InputError::InvalidDuration {
                input: params.duration_expr,
                reason: "duration must be greater than zero".to_string(),
            }
            .into());
        }

        if self.active_count() >= config.max_active_polls {
            return Err(PollError::TooManyActivePolls {
                limit: config.max_active_polls,
            }
            .into());
        }

        let target_time =
            now.checked_add_signed(duration)
                .ok_or(InternalError::TargetTimeOutOfRange {
                    seconds: duration.num_seconds(),
                })?;

        let id = PollId(self.next_id);
        if self.polls.contains_key(&id) {
            return Err(InternalError::PollIdsExhausted.into());
        }
        self.next_id = self.next_id.saturating_add(1);

        let poll = Poll {
            id,
            server_name: server_name.to_string(),
            created_by: params.created_by,
            role_target: params.role_target,
            description: params.description,
            created_at: now,
            target_time,
            state: PollState::Active,
            closed_at: None,
            threshold_notified: false,
            due_notified: false,
            message: None,
        };

        self.polls.insert(id, poll.clone());

        Ok(poll)
    }

    /// Gets a poll by id.
    pub fn get(&self, id: PollId) -> Result<&Poll, PollError> {
        self.polls.get(&id).ok_or_else(|| PollError::not_found(id))
    }

    /// Finds the poll displayed by a Discord message.
    pub fn find_by_message(&self, message_id: u64) -> Option<&Poll> {
        self.polls
            .values()
            .find(|poll| poll.message.is_some_and(|m| m.message_id == message_id))
    }

    /// Resolves a user supplied reference that is either a poll id or the id of the
    /// message displaying the poll.
    pub fn find_by_reference(&self, reference: u64) -> Result<&Poll, PollError> {
        self.polls
            .get(&PollId(reference))
            .or_else(|| self.find_by_message(reference))
            .ok_or_else(|| PollError::not_found(reference))
    }

    /// Cancels an active poll.
    ///
    /// # Returns
    /// - `Ok(Poll)` - The poll in its cancelled state
    /// - `Err(PollError::NotFound)` - Unknown id
    /// - `Err(PollError::AlreadyTerminal)` - The poll already left the active state
    pub fn cancel(&mut self, id: PollId, now: DateTime<Utc>) -> Result<Poll, PollError> {
        let poll = self.active_mut(id)?;
        poll.close(PollState::Cancelled, now);
        Ok(poll.clone())
    }

    /// Completes an active poll that has reached its target time.
    ///
    /// Only polls kept active past their target (auto-cancel disabled) can be
    /// completed; anything earlier is rejected with `NotDue`.
    pub fn complete(&mut self, id: PollId, now: DateTime<Utc>) -> Result<Poll, PollError> {
        let poll = self.active_mut(id)?;
        if poll.target_time > now {
            return Err(PollError::NotDue(id));
        }
        poll.close(PollState::Completed, now);
        Ok(poll.clone())
    }

    /// Active polls ordered by target time, soonest first. Ties keep creation order.
    pub fn list_active(&self) -> Vec<Poll> {
        let mut active: Vec<Poll> = self
            .polls
            .values()
            .filter(|poll| poll.is_active())
            .cloned()
            .collect();
        active.sort_by_key(|poll| (poll.target_time, poll.id));
        active
    }

    /// Recomputes a single poll immediately.
    ///
    /// Applies the same countdown policy as the periodic cycle, so an overdue poll
    /// with auto-cancel enabled comes back `Expired`.
    ///
    /// # Returns
    /// - `Ok(RefreshOutcome)` - Updated poll, remaining seconds and emitted events
    /// - `Err(PollError::NotFound)` - Unknown id
    /// - `Err(PollError::AlreadyTerminal)` - The poll already left the active state
    pub fn refresh(
        &mut self,
        id: PollId,
        config: &PollConfig,
        now: DateTime<Utc>,
    ) -> Result<RefreshOutcome, PollError> {
        let poll = self.active_mut(id)?;
        let (updated, events) = countdown::recompute(poll, config, now);
        *poll = updated.clone();

        let remaining_seconds = updated.remaining(now).num_seconds();

        Ok(RefreshOutcome {
            overdue: remaining_seconds <= 0,
            remaining_seconds,
            poll: updated,
            events,
        })
    }

    /// Records the message that displays a poll.
    pub fn attach_message(
        &mut self,
        id: PollId,
        message: PollMessage,
    ) -> Result<Poll, PollError> {
        let poll = self
            .polls
            .get_mut(&id)
            .ok_or_else(|| PollError::not_found(id))?;
        poll.message = Some(message);
        Ok(poll.clone())
    }

    /// Runs one countdown cycle over every poll.
    ///
    /// Closed polls past their retention window are purged first, then each active
    /// poll is recomputed. Running the cycle twice at the same instant emits nothing
    /// the second time.
    pub fn run_cycle(&mut self, config: &PollConfig, now: DateTime<Utc>) -> CycleReport {
        let mut report = CycleReport::default();

        self.polls.retain(|id, poll| {
            let purge = countdown::is_purgeable(poll, config, now);
            if purge {
                report.purged.push(*id);
            }
            !purge
        });

        for poll in self.polls.values_mut().filter(|poll| poll.is_active()) {
            let (updated, events) = countdown::recompute(poll, config, now);
            *poll = updated;
            report
                .events
                .extend(events.into_iter().map(|event| (poll.clone(), event)));
        }

        report.active = self.list_active();
        report
    }

    fn active_mut(&mut self, id: PollId) -> Result<&mut Poll, PollError> {
        let poll = self
            .polls
            .get_mut(&id)
            .ok_or_else(|| PollError::not_found(id))?;
        if poll.state.is_terminal() {
            return Err(PollError::AlreadyTerminal {
                id,
                state: poll.state,
            });
        }
        Ok(poll)
    }
}

//! Countdown policy applied to active polls.
//!
//! `recompute` is a pure function of a poll, the configuration and the current time.
//! It never performs I/O, so the timer that drives it can change without touching the
//! policy, and every transition can be tested with a fixed clock.

use chrono::{DateTime, TimeDelta, Utc};

use crate::server::model::poll::{Poll, PollConfig, PollEvent, PollState};

/// Recomputes a poll against the current time.
///
/// For an active poll:
/// - remaining time at or below zero closes the poll as `Expired` when `auto_cancel`
///   is set, otherwise emits `Due` once and leaves the poll active and overdue
/// - remaining time below the notification threshold emits `NearingExpiry` once
///
/// Terminal polls are returned unchanged with no events.
///
/// # Arguments
/// - `poll` - Poll as currently stored
/// - `config` - Countdown configuration
/// - `now` - Current time
///
/// # Returns
/// - `(Poll, Vec<PollEvent>)` - The updated poll and the events to announce
pub fn recompute(poll: &Poll, config: &PollConfig, now: DateTime<Utc>) -> (Poll, Vec<PollEvent>) {
    let mut updated = poll.clone();
    let mut events = Vec::new();

    if !poll.is_active() {
        return (updated, events);
    }

    let remaining = poll.remaining(now);

    if remaining <= TimeDelta::zero() {
        if config.auto_cancel {
            updated.close(PollState::Expired, now);
            events.push(PollEvent::Expired);
        } else if !updated.due_notified {
            updated.due_notified = true;
            events.push(PollEvent::Due);
        }
        return (updated, events);
    }

    if !updated.threshold_notified && remaining < threshold(config) {
        updated.threshold_notified = true;
        events.push(PollEvent::NearingExpiry);
    }

    (updated, events)
}

/// Whether a closed poll has been kept long enough to be purged.
///
/// Closed polls stay readable for one update interval so an operator can still see
/// the final state, then the next cycle removes them.
pub fn is_purgeable(poll: &Poll, config: &PollConfig, now: DateTime<Utc>) -> bool {
    match poll.closed_at {
        Some(closed_at) if poll.state.is_terminal() => closed_at
            .checked_add_signed(interval(config))
            .is_some_and(|purge_at| purge_at <= now),
        _ => false,
    }
}

fn threshold(config: &PollConfig) -> TimeDelta {
    i64::try_from(config.notification_threshold_minutes)
        .ok()
        .and_then(TimeDelta::try_minutes)
        .unwrap_or(TimeDelta::MAX)
}

fn interval(config: &PollConfig) -> TimeDelta {
    i64::try_from(config.update_interval_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::poll::PollId;

    fn poll(target_in: TimeDelta, now: DateTime<Utc>) -> Poll {
        Poll {
            id: PollId(1),
            server_name: "Testing Server".to_string(),
            created_by: "alice".to_string(),
            role_target: None,
            description: None,
            created_at: now - TimeDelta::minutes(1),
            target_time: now + target_in,
            state: PollState::Active,
            closed_at: None,
            threshold_notified: false,
            due_notified: false,
            message: None,
        }
    }

    fn config(auto_cancel: bool) -> PollConfig {
        PollConfig {
            auto_cancel,
            notification_threshold_minutes: 5,
            ..PollConfig::default()
        }
    }

    #[test]
    fn leaves_distant_poll_untouched() {
        let now = Utc::now();
        let original = poll(TimeDelta::minutes(30), now);

        let (updated, events) = recompute(&original, &config(true), now);

        assert_eq!(updated, original);
        assert!(events.is_empty());
    }

    #[test]
    fn emits_nearing_expiry_once() {
        let now = Utc::now();
        let original = poll(TimeDelta::minutes(4), now);

        let (first, events) = recompute(&original, &config(true), now);
        assert_eq!(events, vec![PollEvent::NearingExpiry]);
        assert!(first.threshold_notified);

        let (second, events) = recompute(&first, &config(true), now + TimeDelta::minutes(1));
        assert!(events.is_empty());
        assert_eq!(second, first);
    }

    #[test]
    fn zero_threshold_disables_notice() {
        let now = Utc::now();
        let config = PollConfig {
            notification_threshold_minutes: 0,
            ..PollConfig::default()
        };

        let (_, events) = recompute(&poll(TimeDelta::seconds(10), now), &config, now);

        assert!(events.is_empty());
    }

    #[test]
    fn expires_overdue_poll_with_auto_cancel() {
        let now = Utc::now();
        let original = poll(TimeDelta::seconds(-1), now);

        let (updated, events) = recompute(&original, &config(true), now);

        assert_eq!(updated.state, PollState::Expired);
        assert_eq!(updated.closed_at, Some(now));
        assert_eq!(events, vec![PollEvent::Expired]);
    }

    #[test]
    fn keeps_overdue_poll_active_without_auto_cancel() {
        let now = Utc::now();
        let original = poll(TimeDelta::zero(), now);

        let (first, events) = recompute(&original, &config(false), now);
        assert_eq!(first.state, PollState::Active);
        assert_eq!(events, vec![PollEvent::Due]);

        let (_, events) = recompute(&first, &config(false), now + TimeDelta::minutes(1));
        assert!(events.is_empty());
    }

    #[test]
    fn ignores_terminal_polls() {
        let now = Utc::now();
        let mut cancelled = poll(TimeDelta::seconds(-10), now);
        cancelled.close(PollState::Cancelled, now);

        let (updated, events) = recompute(&cancelled, &config(true), now);

        assert_eq!(updated.state, PollState::Cancelled);
        assert!(events.is_empty());
    }

    #[test]
    fn purges_closed_polls_after_one_interval() {
        let now = Utc::now();
        let mut closed = poll(TimeDelta::seconds(-10), now);
        closed.close(PollState::Expired, now);
        let config = config(true);

        assert!(!is_purgeable(&closed, &config, now));
        assert!(is_purgeable(&closed, &config, now + TimeDelta::seconds(60)));
        assert!(!is_purgeable(&poll(TimeDelta::minutes(1), now), &config, now));
    }
}

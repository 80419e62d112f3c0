//! In-memory authority for server status and polls.
//!
//! The registry is the single source of truth while the process runs. It performs no
//! I/O: services lock it, mutate it, persist a snapshot and queue notifications.

pub mod countdown;
pub mod poll;
pub mod status;

use crate::server::{
    data::state::StateSnapshot,
    registry::{poll::PollRegistry, status::StatusRegister},
};

/// Server status plus poll registry, guarded together by one lock in `AppState`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    pub status: StatusRegister,
    pub polls: PollRegistry,
}

impl Registry {
    /// Rebuilds the registry from a persisted snapshot.
    pub fn from_snapshot(snapshot: StateSnapshot) -> Self {
        Self {
            status: StatusRegister::new(snapshot.status),
            polls: PollRegistry::from_parts(snapshot.polls, snapshot.next_poll_id),
        }
    }

    /// Captures everything the state file stores.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            status: self.status.status().clone(),
            polls: self.polls.polls().cloned().collect(),
            next_poll_id: self.polls.next_id(),
        }
    }
}

use thiserror::Error;

use crate::server::model::poll::{PollId, PollState};

/// Poll lookup, lifecycle and capacity errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// No poll with this id (or message id) is in the registry.
    ///
    /// Results in a 404 Not Found.
    #[error("Poll {0} not found")]
    NotFound(String),

    /// The poll already left the active state and can no longer change.
    ///
    /// Results in a 409 Conflict.
    #[error("Poll {id} is already {state}")]
    AlreadyTerminal {
        /// The poll that was addressed
        id: PollId,
        /// Its current terminal state
        state: PollState,
    },

    /// The configured maximum number of concurrently active polls is reached.
    ///
    /// Results in a 409 Conflict.
    #[error("Too many active polls (limit {limit})")]
    TooManyActivePolls {
        /// The configured maximum
        limit: usize,
    },

    /// An operator tried to complete a poll before its target time.
    ///
    /// Results in a 409 Conflict.
    #[error("Poll {0} has not reached its target time yet")]
    NotDue(PollId),
}

impl PollError {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        PollError::NotFound(id.to_string())
    }
}

//! Events handed to the announcement sink.
//!
//! A notification carries a snapshot of the records it concerns so the announcement
//! side never has to reach back into the registry while rendering it.

use crate::server::model::{
    poll::Poll,
    server_status::{EndedSession, ServerStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A server session was started.
    ServerStarted(ServerStatus),
    /// The running session was shut down.
    ServerShutdown(EndedSession),
    /// A poll was created and needs its message posted.
    PollCreated(Poll),
    /// An active poll's message should be re-rendered with the current remaining time.
    PollRender(Poll),
    /// A poll's remaining time dropped below the notification threshold.
    PollNearingExpiry(Poll),
    /// A poll reached its target time and stays open.
    PollDue(Poll),
    /// A poll reached its target time and was closed.
    PollExpired(Poll),
    /// A poll was cancelled by an operator.
    PollCancelled { poll: Poll, cancelled_by: String },
    /// A poll was closed by an operator after its target time.
    PollCompleted { poll: Poll, completed_by: String },
}

impl Notification {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::ServerStarted(_) => "server_started",
            Notification::ServerShutdown(_) => "server_shutdown",
            Notification::PollCreated(_) => "poll_created",
            Notification::PollRender(_) => "poll_render",
            Notification::PollNearingExpiry(_) => "poll_nearing_expiry",
            Notification::PollDue(_) => "poll_due",
            Notification::PollExpired(_) => "poll_expired",
            Notification::PollCancelled { .. } => "poll_cancelled",
            Notification::PollCompleted { .. } => "poll_completed",
        }
    }
}

use thiserror::Error;

/// Server status state machine violations.
///
/// Both variants result in a 409 Conflict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// A session is already running; it has to be shut down before another startup.
    #[error("A server session is already running{}", .server_name.as_ref().map(|n| format!(" ({n})")).unwrap_or_default())]
    AlreadyRunning {
        /// Name of the running server, if one was recorded
        server_name: Option<String>,
    },

    /// No session is running, so there is nothing to shut down.
    #[error("No server session is running")]
    NotRunning,
}

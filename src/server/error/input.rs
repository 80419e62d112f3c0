use thiserror::Error;

/// Malformed command or request input.
///
/// Every variant results in a 400 Bad Request, or a chat reply quoting the problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Duration expression could not be parsed.
    ///
    /// Accepted expressions are concatenated `<integer><unit>` tokens using the units
    /// `min`, `h`, `d`, `w`, `mo` and `y`.
    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration {
        /// The expression as given
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// Command arguments are missing or malformed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Channel argument is not a channel id or `<#id>` mention.
    #[error("Invalid channel '{0}'")]
    InvalidChannel(String),

    /// Role argument is empty or mentions a role that does not exist.
    #[error("Invalid role '{0}'")]
    InvalidRole(String),

    /// Poll reference is not a poll id or message id.
    #[error("Invalid poll reference '{0}'")]
    InvalidPollReference(String),
}

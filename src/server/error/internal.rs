use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to convert Unix timestamp to Discord timestamp
    ///
    /// Occurs when a valid Unix timestamp cannot be converted to Discord's
    /// timestamp format, typically due to timestamp being out of range.
    #[error("Failed to convert Unix timestamp {timestamp} to Discord timestamp: {reason}")]
    InvalidDiscordTimestamp {
        /// The Unix timestamp that failed to convert
        timestamp: i64,
        /// The reason for conversion failure
        reason: String,
    },

    /// Target time computation overflowed the supported date range.
    #[error("Target time out of range for a duration of {seconds} seconds")]
    TargetTimeOutOfRange {
        /// Requested duration
        seconds: i64,
    },

    /// Every poll id up to `u64::MAX` is taken.
    #[error("No poll ids left to assign")]
    PollIdsExhausted,

    /// A stored Discord id is zero, which Discord never assigns.
    ///
    /// Raised instead of handing the id to serenity, whose id types reject zero.
    #[error("Stored {kind} id is 0")]
    ZeroDiscordId {
        /// Kind of id, such as `channel` or `message`
        kind: &'static str,
    },
}

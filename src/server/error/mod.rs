//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses and chat replies. The `AppError`
//! enum serves as the top-level error type that wraps domain-specific errors and
//! implements `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;
pub mod data;
pub mod input;
pub mod internal;
pub mod poll;
pub mod status;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{
            auth::AuthError, config::ConfigError, data::DataError, input::InputError,
            internal::InternalError, poll::PollError, status::StatusError,
        },
        util::duration::ACCEPTED_UNITS,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain errors map onto client facing status
/// codes and stable error codes, infrastructure errors become a generic 500.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or a rejected setting change.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// 401 Unauthorized for missing or unknown credentials, 403 Forbidden for a
    /// missing capability.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Malformed duration, mention, channel or argument input.
    ///
    /// Results in 400 Bad Request.
    #[error(transparent)]
    InputErr(#[from] InputError),

    /// Server status state machine violation.
    ///
    /// Results in 409 Conflict.
    #[error(transparent)]
    StatusErr(#[from] StatusError),

    /// Poll lookup, lifecycle or capacity error.
    ///
    /// 404 Not Found for unknown polls, 409 Conflict otherwise.
    #[error(transparent)]
    PollErr(#[from] PollError),

    /// Reading or writing a data file failed.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DataErr(#[from] DataError),

    /// Internal invariant violation.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Results in 500 Internal Server Error when
    /// Discord bot operations fail.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    ///
    /// Results in 500 Internal Server Error when scheduled job operations fail.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Socket or other I/O error outside the data directory.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Maps a malformed JSON request body onto a 400 with the standard error envelope.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InputErr(InputError::InvalidArguments(rejection.body_text()))
    }
}

/// Client facing view of an error: status, stable code, message and details.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDescription {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Maps the error onto its HTTP status, error code and client facing message.
    ///
    /// Infrastructure errors are described with a generic message; their detail only
    /// goes to the server log.
    pub fn describe(&self) -> ErrorDescription {
        let (status, code, details) = match self {
            Self::InputErr(InputError::InvalidDuration { input, .. }) => (
                StatusCode::BAD_REQUEST,
                "POLL_001",
                Some(json!({ "input": input, "accepted_units": ACCEPTED_UNITS })),
            ),
            Self::InputErr(_) => (StatusCode::BAD_REQUEST, "VALIDATION_001", None),
            Self::StatusErr(StatusError::AlreadyRunning { server_name }) => (
                StatusCode::CONFLICT,
                "SSU_001",
                server_name
                    .as_ref()
                    .map(|name| json!({ "server_name": name })),
            ),
            Self::StatusErr(StatusError::NotRunning) => (StatusCode::CONFLICT, "SSD_001", None),
            Self::PollErr(PollError::NotFound(_)) => (StatusCode::NOT_FOUND, "POLL_002", None),
            Self::PollErr(PollError::AlreadyTerminal { state, .. }) => (
                StatusCode::CONFLICT,
                "POLL_003",
                Some(json!({ "state": state })),
            ),
            Self::PollErr(PollError::NotDue(_)) => (StatusCode::CONFLICT, "POLL_004", None),
            Self::PollErr(PollError::TooManyActivePolls { limit }) => (
                StatusCode::CONFLICT,
                "POLL_005",
                Some(json!({ "limit": limit })),
            ),
            Self::ConfigErr(ConfigError::InvalidSetting { setting, .. }) => (
                StatusCode::BAD_REQUEST,
                "CONFIG_001",
                Some(json!({ "setting": setting })),
            ),
            Self::ConfigErr(ConfigError::ChannelNotConfigured(channel)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CONFIG_002",
                Some(json!({ "channel": channel })),
            ),
            Self::AuthErr(AuthError::MissingCredentials | AuthError::UnknownToken) => {
                (StatusCode::UNAUTHORIZED, "AUTH_001", None)
            }
            Self::AuthErr(AuthError::AccessDenied {
                capability,
                required_roles,
                ..
            }) => (
                StatusCode::FORBIDDEN,
                "AUTH_002",
                Some(json!({
                    "capability": capability.to_string(),
                    "required_roles": required_roles,
                })),
            ),
            _ => {
                return ErrorDescription {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "INTERNAL_001",
                    message: "Internal server error".to_string(),
                    details: None,
                }
            }
        };

        ErrorDescription {
            status,
            code,
            message: self.to_string(),
            details,
        }
    }

    /// Renders the error as a chat reply.
    ///
    /// Client errors quote their message; internal errors are logged and answered
    /// with a generic notice. Command hints are written with `prefix`.
    pub fn user_message(&self, prefix: &str) -> String {
        let description = self.describe();
        if description.status.is_server_error()
            && description.status != StatusCode::SERVICE_UNAVAILABLE
        {
            tracing::error!("Command failed: {}", self);
            return "❌ An error occurred while processing the command.".to_string();
        }

        match self {
            Self::InputErr(InputError::InvalidDuration { .. }) => {
                "❌ Invalid time format. Use formats like: `[45min]`, `[1d30min]`, `[1w]`, `[1mo]`, `[1y3mo2w6d25min]`".to_string()
            }
            Self::ConfigErr(ConfigError::ChannelNotConfigured(channel)) => format!(
                "❌ {} channel not configured. An admin can set it with `{}config {}_channel <channel_id>`",
                channel.label(),
                prefix,
                channel.label().to_lowercase()
            ),
            Self::AuthErr(AuthError::AccessDenied { required_roles, .. })
                if !required_roles.is_empty() =>
            {
                format!(
                    "❌ You don't have permission to use this command. Required roles: {}",
                    required_roles.join(", ")
                )
            }
            Self::AuthErr(AuthError::AccessDenied { .. }) => {
                "❌ You don't have permission to use this command.".to_string()
            }
            _ => format!("❌ {}", description.message),
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// Every response carries the standard error envelope with a fresh correlation id.
/// The id is logged alongside the error so a client report can be matched to the
/// server log.
///
/// # Returns
/// - 400 Bad Request - Malformed input or rejected setting
/// - 401 Unauthorized / 403 Forbidden - Authentication and capability failures
/// - 404 Not Found - Unknown poll
/// - 409 Conflict - Status machine, poll lifecycle and capacity violations
/// - 503 Service Unavailable - Announcement channel not configured
/// - 500 Internal Server Error - Everything else
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let description = self.describe();
        let correlation_id = Uuid::new_v4().to_string();

        if description.status.is_server_error() {
            tracing::error!(correlation_id = %correlation_id, "{}", self);
        } else {
            tracing::debug!(correlation_id = %correlation_id, "{}", self);
        }

        (
            description.status,
            Json(ErrorDto::new(
                description.code,
                description.message,
                description.details,
                correlation_id,
            )),
        )
            .into_response()
    }
}

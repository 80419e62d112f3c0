use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error envelope returned by every failing REST call.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ErrorDto {
    /// Always `"error"`.
    pub status: String,
    pub error: ErrorBodyDto,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ErrorBodyDto {
    /// Stable machine readable code such as `POLL_005`.
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    /// Identifier logged with the error on the server side.
    pub correlation_id: String,
}

impl ErrorDto {
    pub fn new(
        code: &str,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            status: "error".to_string(),
            error: ErrorBodyDto {
                code: code.to_string(),
                message: message.into(),
                details,
                correlation_id: correlation_id.into(),
            },
            timestamp: Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct HealthDto {
    pub status: String,
    pub version: String,
}

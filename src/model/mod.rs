//! Data transfer objects of the REST mirror.
//!
//! These types are what the HTTP API accepts and returns. They carry `utoipa` schemas
//! for the generated OpenAPI document and serialize Discord snowflakes as strings so
//! clients that store numbers as doubles do not lose precision.

pub mod api;
pub mod id;
pub mod poll;
pub mod server_status;
pub mod settings;

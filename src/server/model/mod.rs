//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the registry and service layers,
//! representing the announced server session, startup polls, settings and notifications.
//! Domain models are converted to DTOs at the controller boundary and rendered into
//! embeds at the announcement boundary.

pub mod caller;
pub mod notification;
pub mod poll;
pub mod server_status;
pub mod settings;

//! REST handlers of the API mirror.
//!
//! Each handler authenticates the caller through the `ApiCaller` extractor, checks the
//! capability the operation needs, converts the request DTO into service parameters
//! and converts the result back into a DTO.
//!
//! - `health` - Liveness check
//! - `server_status` - SSU, SSD and the current status
//! - `poll` - SSUP and poll management
//! - `role` - Allowed roles
//! - `settings` - Channels, poll tuning, auto-update and admin users

pub mod health;
pub mod poll;
pub mod role;
pub mod server_status;
pub mod settings;

#[cfg(test)]
mod test;

//! Test fixtures providing reusable JSON documents for the data directory.
//!
//! Fixtures return `serde_json::Value` documents in the shapes the bot reads from
//! disk. Pass them to `TestBuilder::with_settings` or `TestBuilder::with_state`, or
//! deserialize them directly in unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! // Settings with every channel and both API clients configured
//! let settings = fixture::settings::configured();
//!
//! // State file from a bot release that predates poll ids
//! let legacy = fixture::state::legacy_nested();
//! ```

pub mod settings;
pub mod state;

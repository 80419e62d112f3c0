//! SSU Announcer Test Utils
//!
//! Provides shared testing utilities for the announcer's data, service and controller
//! tests. The crate builds isolated data directories seeded with settings and state
//! documents, so every test runs against its own files.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for seeding a data directory
//! - **TestContext**: The seeded data directory, removed again when dropped
//! - **TestError**: Error types that can occur during test setup
//!
//! JSON documents for common scenarios live in `fixture`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, fixture};
//!
//! #[tokio::test]
//! async fn loads_running_session() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_settings(fixture::settings::configured())
//!         .with_state(fixture::state::running())
//!         .build()
//!         .await?;
//!
//!     let repo = StateRepository::new(test.data_dir());
//!     // Perform repository operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;

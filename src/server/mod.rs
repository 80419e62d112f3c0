//! Server side of the announcer: chat bot, REST mirror and business logic.
//!
//! This module contains the complete implementation: entry points (chat commands and
//! REST endpoints), the in-memory registry that owns all mutable state, the services
//! orchestrating changes, JSON persistence and the Discord announcement dispatcher.
//! The REST API uses Axum and the bot uses Serenity.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Gateway event handling and chat commands
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Lock, mutate, persist and notify orchestration
//! - **Registry Layer** (`registry/`) - Status register, poll registry and countdown policy
//! - **Data Layer** (`data/`) - `settings.json` and `state.json` repositories
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types, HTTP responses and chat replies
//! - **Middleware** (`middleware/`) - Authorization gate and API caller extraction
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based process configuration
//! - **State** (`state`) - Shared application state (registry, settings, notifier)
//! - **Startup** (`startup`) - Tracing setup and loading state from the data directory
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - The poll countdown job
//! - **Utilities** (`util/`) - Duration, argument and mention parsing, time formatting
//!
//! # Request Flow
//!
//! A chat command or REST request flows through these layers:
//!
//! 1. **Bot** or **Router** receives the command and routes it to its handler
//! 2. **Middleware** resolves the caller and checks the required capability
//! 3. **Handler** parses arguments or DTOs into params and calls a service
//! 4. **Service** locks the registry, applies the change and persists the snapshot
//! 5. **Service** queues a notification for the announcement dispatcher
//! 6. **Handler** answers with a chat reply or a DTO
//! 7. **Dispatcher** posts or edits the Discord messages in the background

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod registry;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

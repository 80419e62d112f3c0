//! File-backed persistence for settings and runtime state.
//!
//! Settings live in `settings.json` and the server status plus polls live in
//! `state.json`, both inside the data directory. Repositories only move whole
//! documents between disk and the domain models; the registry owns the live state.

pub mod file;
pub mod settings;
pub mod state;

#[cfg(test)]
mod test;

//! Request guards for the REST mirror and the chat commands.
//!
//! - `auth` - Capability checks shared by both surfaces, and the bearer token
//!   extractor that turns a REST request into a `Caller`

pub mod auth;

#[cfg(test)]
mod test;

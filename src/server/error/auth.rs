use thiserror::Error;

use crate::server::model::caller::Capability;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Request carried no bearer token.
    ///
    /// Results in a 401 Unauthorized.
    #[error("Missing bearer token")]
    MissingCredentials,

    /// Bearer token does not belong to any configured API client.
    ///
    /// Results in a 401 Unauthorized. The token itself is never logged.
    #[error("Unknown API token")]
    UnknownToken,

    /// Caller is authenticated but lacks the capability the operation requires.
    ///
    /// Results in a 403 Forbidden.
    #[error("{caller} lacks the {capability} capability")]
    AccessDenied {
        /// Name of the caller
        caller: String,
        /// Capability that was required
        capability: Capability,
        /// Role names that would have granted access
        required_roles: Vec<String>,
    },
}

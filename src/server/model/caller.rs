//! Identity of whoever issued a command, independent of the surface it came from.

use std::fmt;

/// The acting user of a chat command or REST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Discord user id, absent for REST clients.
    pub user_id: Option<u64>,
    /// Display name recorded on the records the caller creates.
    pub name: String,
    /// Role names held by the caller.
    pub roles: Vec<String>,
    /// Guild administrator or a client flagged as admin.
    pub administrator: bool,
}

/// Capability an operation requires from its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Run SSU/SSD/SSUP/USSUP and read polls; granted by the allowed roles.
    Operator,
    /// Change settings; granted to administrators and listed admin users.
    Admin,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Operator => f.write_str("operator"),
            Capability::Admin => f.write_str("admin"),
        }
    }
}

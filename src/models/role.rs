//! Roles and caller identity.
//!
//! The authentication layer is external; it hands the engine a [`Caller`]
//! for every request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::UserId;

/// The closed set of roles known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every operation.
    Admin,
    /// Confirms hours on assigned projects.
    Supervisor,
    /// Field worker; sees only their own records.
    Worker,
    /// Project owner; sees finance data for linked projects.
    Client,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Worker => "worker",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "supervisor" => Ok(Role::Supervisor),
            "worker" => Ok(Role::Worker),
            "client" => Ok(Role::Client),
            other => Err(EngineError::validation(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// The caller's user id.
    pub id: UserId,
    /// The caller's role.
    pub role: Role,
}

impl Caller {
    /// Creates a caller identity.
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true if the caller is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

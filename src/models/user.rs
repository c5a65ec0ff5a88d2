//! User model for the role directory and API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Locally assigned capability label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// May publish videos
    Creator,
    #[default]
    Consumer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Creator => "Creator",
            Role::Consumer => "Consumer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0:?}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Creator" => Ok(Role::Creator),
            "Consumer" => Ok(Role::Consumer),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

/// Profile kept per verified subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserProfile {
    /// Fixed identity reported when sign-in is not configured.
    pub fn guest() -> Self {
        Self {
            name: "Guest".to_string(),
            email: String::new(),
            role: Role::Consumer,
        }
    }
}

/// Request body for `POST /me/role`.
///
/// `role` stays a raw string so unknown values surface as 400 from the
/// handler instead of a decode rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SetRoleRequest {
    #[serde(default)]
    pub role: Option<String>,
}

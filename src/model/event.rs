use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who authored a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    User,
    Narrator,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Narrator => "Narrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Narrator" => Ok(Role::Narrator),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A single turn record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub role: Role,
    pub description: String,
}

impl Event {
    pub fn new(role: Role, description: impl Into<String>) -> Self {
        Self {
            role,
            description: description.into(),
        }
    }

    pub fn user(description: impl Into<String>) -> Self {
        Self::new(Role::User, description)
    }

    pub fn narrator(description: impl Into<String>) -> Self {
        Self::new(Role::Narrator, description)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.description)
    }
}

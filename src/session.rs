//! The authenticated identity a board or page acts on behalf of.
//!
//! Passed explicitly to whatever needs it; there is no process-wide user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    #[default]
    Admin,
    Business,
    Freelancer,
}

impl Role {
    /// Entity type stamped on notes this role creates.
    pub fn entity_type(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Business => write!(f, "business"),
            Role::Freelancer => write!(f, "freelancer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "business" => Ok(Role::Business),
            "freelancer" => Ok(Role::Freelancer),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserSession {
    pub user_id: Option<String>,
    pub role: Role,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: Some(user_id.into()),
            role,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The user id, if one is set and not blank
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

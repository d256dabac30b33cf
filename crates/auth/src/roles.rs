use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of an authenticated principal.
///
/// The canonical names ("admin" / "user") are the only representation that is
/// ever compared: token role claims and stored role names are parsed through
/// [`Role::from_name`] and nowhere else.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

impl Role {
    pub const ADMIN_NAME: &'static str = "admin";
    pub const USER_NAME: &'static str = "user";

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => Self::ADMIN_NAME,
            Role::User => Self::USER_NAME,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, RoleParseError> {
        match name {
            Self::ADMIN_NAME => Ok(Role::Admin),
            Self::USER_NAME => Ok(Role::User),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl core::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

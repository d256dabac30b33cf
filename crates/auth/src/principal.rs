use serde::{Deserialize, Serialize};

use courier_core::UserId;

use crate::{JwtClaims, Role, RoleParseError};

/// The authenticated identity behind a request.
///
/// Rebuilt from verified claims on every request and never mutated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn admin(id: UserId) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn user(id: UserId) -> Self {
        Self::new(id, Role::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Derive the principal from already-validated claims.
    pub fn from_claims(claims: &JwtClaims) -> Result<Self, RoleParseError> {
        Ok(Self {
            id: claims.sub,
            role: Role::from_name(&claims.role)?,
        })
    }
}

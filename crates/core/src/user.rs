//! User profiles as held by the store.

use serde::{Deserialize, Serialize};

use crate::{Entity, UserId};

/// A stored user profile.
///
/// `role_name` is the canonical role string ("admin" / "user"); it is parsed
/// into a typed role at the authorization boundary, never compared ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub role_name: String,
}

impl Entity for UserRecord {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

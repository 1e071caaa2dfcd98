//! Identity types
//!
//! Read-only views of user accounts. Accounts are created elsewhere; this
//! crate only resolves them.

use serde::Serialize;
use uuid::Uuid;

/// A user account resolved from an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CampUser {
    pub id: Uuid,
    pub user_name: String,
    pub email: Option<String>,
}

impl CampUser {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            email: None,
        }
    }

    /// Whether this account is the one behind the given principal name.
    pub fn is_principal(&self, principal: &str) -> bool {
        self.user_name == principal
    }
}

/// Credentials row used only for token issuance, never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredCredentials {
    pub user_name: String,
    pub password_hash: String,
}

//! Authenticated request context

use crate::claims::CampClaims;

/// The authenticated principal behind a request.
///
/// Only the principal *name* is known here. Mapping it to an account is the
/// job of [`crate::UserDirectory`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub principal: String,
}

impl AuthContext {
    /// Name of the authenticated principal
    pub fn principal_name(&self) -> &str {
        &self.principal
    }
}

impl From<CampClaims> for AuthContext {
    fn from(claims: CampClaims) -> Self {
        Self {
            principal: claims.sub,
        }
    }
}
